mod migrate;
mod users;

pub use migrate::cmd_migrate;
pub use users::{cmd_users_list, cmd_users_remove, cmd_users_set_role};
