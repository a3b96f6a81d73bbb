mod users;
mod verify;

pub use users::cmd_list_users;
pub use verify::cmd_verify_token;
