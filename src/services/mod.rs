pub mod token;
pub use token::{Claims, TokenError, TokenIssuer};

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;
