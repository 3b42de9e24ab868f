use crate::{DEFAULT_PAGE_SIZE, TableViewError, TableViewResult};

use clap::Parser;
use std::path::PathBuf;

// https://stackoverflow.com/questions/74068168/clap-rs-not-printing-colors-during-help
fn get_styles() -> clap::builder::Styles {
    let cyan = anstyle::Color::Ansi(anstyle::AnsiColor::Cyan);
    let green = anstyle::Color::Ansi(anstyle::AnsiColor::Green);
    let yellow = anstyle::Color::Ansi(anstyle::AnsiColor::Yellow);

    clap::builder::Styles::styled()
        .placeholder(anstyle::Style::new().fg_color(Some(yellow)))
        .usage(anstyle::Style::new().fg_color(Some(cyan)).bold())
        .header(
            anstyle::Style::new()
                .fg_color(Some(cyan))
                .bold()
                .underline(),
        )
        .literal(anstyle::Style::new().fg_color(Some(green)))
}

// https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template
const APPLET_TEMPLATE: &str = "\
{before-help}
{about-with-newline}
{usage-heading} {usage}

{all-args}
{after-help}";

const EX1: &str = r#" table-view"#;
const EX2: &str = r#" table-view products.json"#;
const EX3: &str = r#" table-view --page-size 25 --light products.json"#;

/// Command-line arguments for the Table View application.
#[derive(Parser, Debug, Clone)]
#[command(
    // Read from `Cargo.toml`.
    author, version, about,
    long_about = None,
    next_line_help = true,
    help_template = APPLET_TEMPLATE,
    styles=get_styles(),
    after_help = format!("EXAMPLES:\n{EX1}\n{EX2}\n{EX3}")
)]
pub struct Arguments {
    /// Path to the JSON document holding the rows.
    #[arg(
        value_name = "FILE_PATH",
        default_value = "data.json",
        required = false,
        help = "Path to a JSON array of row objects [Default: data.json]",
        long_help = "Path to the dataset: a JSON array whose elements are objects.\n\
        Fields named after the table columns (id, name, category, subcategory,\n\
        createdAt, updatedAt, price, sale_price) are displayed; other fields are\n\
        only used by the search box."
    )]
    pub path: PathBuf,

    /// Number of rows shown per page. [Default: 10]
    #[arg(
        short = 'p',
        long,
        value_name = "ROWS",
        default_value_t = DEFAULT_PAGE_SIZE,
        help = "Rows per page (at least 1)",
        value_parser = validate_page_size
    )]
    pub page_size: usize,

    /// Start with the light theme instead of the dark one.
    #[arg(
        short = 'l',
        long,
        help = "Use the light theme",
        action = clap::ArgAction::SetTrue
    )]
    pub light: bool,
}

impl Arguments {
    /// Build `Arguments` struct.
    pub fn build() -> Arguments {
        Arguments::parse()
    }
}

/// clap validator for '--page-size': a positive integer.
fn validate_page_size(s: &str) -> TableViewResult<usize> {
    let invalid = |reason: String| TableViewError::InvalidArgument {
        arg_name: "--page-size".to_string(),
        reason,
    };

    match s.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1".to_string())),
        Ok(size) => Ok(size),
        Err(e) => Err(invalid(format!("'{s}' is not a positive integer: {e}"))),
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_args`
#[cfg(test)]
mod tests_args {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Arguments::parse_from(["table-view"]);

        assert_eq!(args.path, PathBuf::from("data.json"));
        assert_eq!(args.page_size, DEFAULT_PAGE_SIZE);
        assert!(!args.light);
    }

    #[test]
    fn test_args_all_options_short() {
        let args = Arguments::parse_from(["table-view", "-p", "25", "-l", "products.json"]);

        assert_eq!(args.path, PathBuf::from("products.json"));
        assert_eq!(args.page_size, 25);
        assert!(args.light);
    }

    #[test]
    fn test_args_all_options_long() {
        let args =
            Arguments::parse_from(["table-view", "--page-size", "3", "--light", "rows.json"]);

        assert_eq!(args.path, PathBuf::from("rows.json"));
        assert_eq!(args.page_size, 3);
        assert!(args.light);
    }

    #[test]
    fn test_args_rejects_zero_page_size() {
        let result = Arguments::try_parse_from(["table-view", "--page-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert_eq!(validate_page_size("7").ok(), Some(7));
        assert!(matches!(
            validate_page_size("0"),
            Err(TableViewError::InvalidArgument { .. })
        ));
        assert!(validate_page_size("-3").is_err());
        assert!(validate_page_size("ten").is_err());
    }
}
