//! List users command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_users(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<60}", "");

    for user in users {
        let token = if user.token.is_some() { "yes" } else { "no" };
        println!(
            "  ID: {} | Username: {} | Token issued: {} | Created: {}",
            user.id, user.username, token, user.created_at
        );
    }

    Ok(())
}
