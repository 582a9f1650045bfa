use clap::Args;
use color_eyre::eyre::{bail, Result, WrapErr};
use dialoguer::Password;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated passwords
const RANDOM_PASSWORD_LENGTH: usize = 16;

/// Where a new password comes from
#[derive(Args, Debug, Default)]
pub struct PasswordArgs {
    /// Password of the user, required to create a user without --use-random-password
    #[arg(short, long, conflicts_with = "use_random_password")]
    pub password: Option<String>,

    /// Do not prompt for password. Use random string instead.
    #[arg(long)]
    pub use_random_password: bool,
}

/// Generate a random alphanumeric password
#[must_use]
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

fn prompt_password() -> Result<String> {
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .wrap_err("Failed to read password")?;
    let confirmation = Password::new()
        .with_prompt("Repeat for confirmation")
        .interact()
        .wrap_err("Failed to read password confirmation")?;
    if password != confirmation {
        bail!("Passwords did not match");
    }
    Ok(password)
}

impl PasswordArgs {
    /// Resolve the password, prompting on the terminal when neither flag was given
    pub fn resolve(&self) -> Result<String> {
        if self.use_random_password {
            return Ok(generate_password());
        }
        match &self.password {
            Some(password) => Ok(password.clone()),
            None => prompt_password(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_password() {
        let password = generate_password();
        assert_eq!(password.len(), RANDOM_PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(password, generate_password());
    }

    #[test]
    fn test_explicit_password_is_used() {
        let args = PasswordArgs {
            password: Some("s3cret".to_string()),
            use_random_password: false,
        };
        assert_eq!(args.resolve().unwrap(), "s3cret");
    }

    #[test]
    fn test_random_password_wins() {
        let args = PasswordArgs {
            password: None,
            use_random_password: true,
        };
        assert_eq!(args.resolve().unwrap().len(), RANDOM_PASSWORD_LENGTH);
    }
}
