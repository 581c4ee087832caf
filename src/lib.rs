//! `clasp` is a catalog driven, Unix style command line option parser.
//!
//! The program declares its options up front, in an [`Options`] catalog.
//! A [`Parser`] then matches the command line tokens against the catalog, producing a [`CommandLine`] to query.
//! `clasp` aims to accept the option syntaxes users already know from other Unix tools:
//! * Short options, alone or burst together: `-a`, `-abc`.
//! * Short options with attached values: `-fvalue`, `-f=value`, `-Dkey=value`.
//! * Long options, with or without `=`: `--file value`, `--file=value`.
//! * Unambiguous long option prefixes: `--fi` for `--file`.
//! * Long options behind a single hyphen, including attached values: `-file`, `-Xmx512m`.
//! * The `--` terminator, after which every token is a leftover argument.
//!
//! # Usage
//! ```
//! use clasp::{CliOption, HelpFormatter, OptionGroup, Options, Parser};
//!
//! let mut format = OptionGroup::default();
//! format
//!     .add_option(CliOption::builder("j").long_opt("json").desc("Print as json.").build().unwrap())
//!     .add_option(CliOption::builder("y").long_opt("yaml").desc("Print as yaml.").build().unwrap());
//!
//! let mut options = Options::default();
//! options
//!     .add("v", Some("verbose"), false, "Print more.")
//!     .unwrap()
//!     .add_option(
//!         CliOption::builder("D")
//!             .number_of_args(2)
//!             .default_value_separator()
//!             .arg_name("property=value")
//!             .desc("Set a property.")
//!             .build()
//!             .unwrap(),
//!     )
//!     .add_option_group(format);
//!
//! let command_line = Parser::new()
//!     .parse(&options, &["-vj", "-Dmode=fast", "--", "-input.txt"])
//!     .unwrap();
//!
//! assert!(command_line.has_option("verbose"));
//! assert_eq!(command_line.group_selection("yaml"), Some("j"));
//! assert_eq!(command_line.option_properties("D").get("mode"), Some(&"fast".to_string()));
//! assert_eq!(command_line.args(), vec!["-input.txt"]);
//!
//! let usage = HelpFormatter::new().render_usage("summer", &options);
//! assert_eq!(usage, "usage: summer [-D <property=value>] [-j | -y] [-v]");
//! ```
//!
//! # Errors
//! Parsing either succeeds entirely, or fails with a [`ParseError`] and no partial result.
//! Each error message is ready to show the user as-is:
//! ```console
//! $ summer -q
//! Parse error: Unrecognized option: -q
//!
//! $ summer --ver
//! Parse error: Ambiguous option: '--ver'  (could be: 'verbose', 'version')
//!
//! $ summer -j -y
//! Parse error: The option 'y' was specified but an option from this group has already been selected: 'j'
//! ```
//! See [`Parser::parse_env_or_exit`] for the version which prints the error and exits.
//!
//! # Features
//! * `tracing_debug`: log the parser's decisions via [`tracing`](https://docs.rs/tracing) at `debug` level.
pub use clasp_core::*;
