//! The two implicit configuration sources
//!
//! Both the executable's own file name and the command-line trailer feed the
//! same mode grammar. The file name lets a renamed binary carry its defaults;
//! the command line is applied second and wins on any field it sets.

use std::env;

/// Base file name of the running executable, extension included.
pub fn executable_mode_text() -> Option<String> {
    let exe = env::current_exe().ok()?;
    let name = exe.file_name()?;
    Some(name.to_string_lossy().into_owned())
}

/// The command-line text after the program name, rebuilt with single spaces.
pub fn command_line_mode_text() -> String {
    env::args().skip(1).collect::<Vec<_>>().join(" ")
}

/// Strip the leading program-name token from a raw command line.
///
/// Handles a quoted program path (spaces inside the quotes belong to the
/// token) as well as an unquoted one, plus surrounding runs of spaces. Used
/// where the platform hands over the command line as a single string.
pub fn strip_program_token(command_line: &str) -> &str {
    let rest = command_line.trim_start_matches(' ');
    let rest = if let Some(quoted) = rest.strip_prefix('"') {
        match quoted.split_once('"') {
            Some((_, tail)) => tail,
            None => "",
        }
    } else {
        match rest.split_once(' ') {
            Some((_, tail)) => tail,
            None => "",
        }
    };
    rest.trim_start_matches(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_program_token() {
        assert_eq!(strip_program_token("soundkeeper sine f=440"), "sine f=440");
    }

    #[test]
    fn quoted_program_token_keeps_inner_spaces() {
        assert_eq!(
            strip_program_token(r#""C:\Program Files\Sound Keeper\soundkeeper.exe" digital"#),
            "digital"
        );
    }

    #[test]
    fn leading_spaces_are_skipped() {
        assert_eq!(strip_program_token("   soundkeeper   noise a50"), "noise a50");
    }

    #[test]
    fn no_arguments_yields_empty_text() {
        assert_eq!(strip_program_token("soundkeeper"), "");
        assert_eq!(strip_program_token(r#""soundkeeper.exe""#), "");
        assert_eq!(strip_program_token(""), "");
    }

    #[test]
    fn unterminated_quote_consumes_everything() {
        assert_eq!(strip_program_token(r#""soundkeeper sine"#), "");
    }
}
