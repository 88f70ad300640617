//! User maintenance command handlers

use anyhow::bail;

use crate::config::Config;
use crate::db::Store;
use crate::domain::Role;
use crate::services::auth_service_impl::normalize_email;

pub async fn cmd_users_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users registered.");
        println!();
        println!("The first account registered through POST /api/auth/register becomes ADMIN.");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        println!("{:>4}  {:<5}  {} <{}>", user.id, user.role, user.name, user.email);
    }

    Ok(())
}

pub async fn cmd_users_set_role(config: &Config, email: &str, role: Role) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    let email = normalize_email(email);

    if !store.set_user_role(&email, role).await? {
        bail!("No user with email {email}");
    }

    println!("{email} is now {role}");
    Ok(())
}

pub async fn cmd_users_remove(config: &Config, email: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    let email = normalize_email(email);

    let Some(user) = store.get_user_by_email(&email).await? else {
        bail!("No user with email {email}");
    };

    store.delete_user(user.id).await?;
    println!("Removed user {} <{}>", user.name, user.email);
    println!("Any session they still hold stops working on its next request.");
    Ok(())
}
