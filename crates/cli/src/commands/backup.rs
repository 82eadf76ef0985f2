//! Local settings backup commands.
//!
//! # Usage
//!
//! ```bash
//! kynship-cli backup show
//! ```

use kynship_content::FileBackup;
use kynship_content::settings::BACKUP_KEY;

use super::{CliError, backup_dir, print_json};

/// Print the last settings backup, if one was written.
pub async fn show() -> Result<(), CliError> {
    let backup = FileBackup::new(backup_dir());

    match backup.read(BACKUP_KEY).await? {
        Some(value) => print_json(&value),
        None => {
            tracing::warn!(
                "No settings backup at {}",
                backup.path_for(BACKUP_KEY).display()
            );
            Ok(())
        }
    }
}
