//! Home-directory expansion for path flags.

use std::path::MAIN_SEPARATOR;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while expanding a leading `~`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PathExpandError {
    /// The invoking user's home directory could not be determined.
    #[error("unable to determine the home directory")]
    HomeUnavailable,
    /// The home directory is not valid UTF-8.
    #[error("home directory {0} is not valid UTF-8")]
    NonUtf8Home(String),
    /// The input names another user's home directory (`~user/...`).
    #[error("cannot expand user-specific home directory in {0}")]
    OtherUser(String),
}

/// Expands a leading `~` or `~/` to the invoking user's home directory.
///
/// Paths without a leading `~` are returned unchanged.
///
/// # Errors
///
/// Returns [`PathExpandError`] when the home directory is unknown or not
/// UTF-8, or when the input uses the `~user` form.
///
/// # Examples
///
/// ```
/// use typed_flags::path::expand_home;
///
/// assert_eq!(expand_home("/abs/path")?, "/abs/path");
/// # Ok::<(), typed_flags::path::PathExpandError>(())
/// ```
pub fn expand_home(input: &str) -> Result<Utf8PathBuf, PathExpandError> {
    let Some(rest) = input.strip_prefix('~') else {
        return Ok(Utf8PathBuf::from(input));
    };
    if !rest.is_empty() && !rest.starts_with(is_separator) {
        return Err(PathExpandError::OtherUser(input.to_owned()));
    }
    let home = home_dir()?;
    let relative = rest.trim_start_matches(is_separator);
    if relative.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(relative))
    }
}

const fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

fn home_dir() -> Result<Utf8PathBuf, PathExpandError> {
    let home = dirs::home_dir().ok_or(PathExpandError::HomeUnavailable)?;
    Utf8PathBuf::from_path_buf(home)
        .map_err(|path| PathExpandError::NonUtf8Home(path.display().to_string()))
}
