//! Password encryption commands

use std::io::{self, BufRead};

use m2_crypto::{Decryptor, encrypt_master};
use m2_resolve::SettingsPaths;

use crate::error::{CliError, Result};

/// Print a password encrypted for the `<master>` element of settings-security.xml
pub fn run_encrypt_master(password: Option<String>) -> Result<()> {
    let password = password_or_stdin(password, &mut io::stdin().lock())?;
    println!("{}", encrypt_master(&password));
    Ok(())
}

/// Print a password encrypted with the master from the configured security file
pub fn run_encrypt_password(paths: &SettingsPaths, password: Option<String>) -> Result<()> {
    let password = password_or_stdin(password, &mut io::stdin().lock())?;
    let decryptor = Decryptor::new(paths.security.as_deref());
    println!("{}", decryptor.encrypt(&password)?);
    Ok(())
}

/// The given password, or the first line of `input` without its line ending
fn password_or_stdin(password: Option<String>, input: &mut impl BufRead) -> Result<String> {
    let password = match password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            input.read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        return Err(CliError::user("Password must not be empty"));
    }
    Ok(password)
}
