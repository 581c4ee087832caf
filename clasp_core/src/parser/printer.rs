use std::collections::HashSet;

use terminal_size::{terminal_size, Width};

use crate::api::{CliOption, OptionGroup, Options};
use crate::constant::*;
use crate::parser::interface::{wrap, ConsoleInterface, UserInterface};
use crate::parser::{ColumnRenderer, ConfigError, LeftWidth, PaddingWidth, TotalWidth};

/// Formats the usage line and option table of a catalog.
///
/// ### Example
/// ```
/// # use clasp_core as clasp;
/// use clasp::{HelpFormatter, Options};
///
/// let mut options = Options::default();
/// options
///     .add("a", Some("all"), false, "Show all entries.")
///     .unwrap()
///     .add("f", None, true, "The input file.")
///     .unwrap();
///
/// let help = HelpFormatter::new()
///     .render_help("ls", None, &options, None, true)
///     .unwrap();
///
/// assert_eq!(
///     help,
///     "usage: ls [-a] [-f <arg>]\n -a,--all   Show all entries.\n -f <arg>   The input file."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpFormatter {
    width: usize,
    left_padding: usize,
    desc_padding: usize,
    syntax_prefix: String,
    arg_name: String,
    long_opt_separator: String,
}

impl Default for HelpFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpFormatter {
    /// A formatter with the default width of 74 columns.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            left_padding: DEFAULT_LEFT_PAD,
            desc_padding: DEFAULT_DESC_PAD,
            syntax_prefix: DEFAULT_SYNTAX_PREFIX.to_string(),
            arg_name: DEFAULT_ARG_NAME.to_string(),
            long_opt_separator: DEFAULT_LONG_OPT_SEPARATOR.to_string(),
        }
    }

    /// A formatter as wide as the terminal, or 74 columns when there is no terminal.
    pub fn terminal() -> Self {
        let width = if let Some((Width(terminal_width), _)) = terminal_size() {
            terminal_width as usize
        } else {
            DEFAULT_WIDTH
        };

        Self::new().width(width)
    }

    /// Set the total width to wrap at.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the padding before each option row.
    pub fn left_padding(mut self, padding: usize) -> Self {
        self.left_padding = padding;
        self
    }

    /// Set the padding between the option column and the description column.
    pub fn desc_padding(mut self, padding: usize) -> Self {
        self.desc_padding = padding;
        self
    }

    /// Set the text preceding the usage line (default: `"usage: "`).
    pub fn syntax_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.syntax_prefix = prefix.into();
        self
    }

    /// Set the value placeholder for options without their own argument name (default: `"arg"`).
    pub fn arg_name(mut self, arg_name: impl Into<String>) -> Self {
        self.arg_name = arg_name.into();
        self
    }

    /// Set the text between a long option and its value placeholder (default: `" "`).
    pub fn long_opt_separator(mut self, separator: impl Into<String>) -> Self {
        self.long_opt_separator = separator.into();
        self
    }

    /// Render the usage line generated from the catalog, ex: `usage: app [-a] [-b <arg>] [-c | -d]`.
    pub fn render_usage(&self, app: &str, options: &Options) -> String {
        let mut processed: HashSet<usize> = HashSet::default();
        let mut clauses = Vec::default();

        for option in sorted(options.options()) {
            match options.group_index(option.key()) {
                Some(index) => {
                    if processed.insert(index) {
                        clauses.push(self.group_clause(&options.groups()[index]));
                    }
                }
                None => clauses.push(self.option_clause(option, option.is_required())),
            }
        }

        let usage = format!("{}{app} {}", self.syntax_prefix, clauses.join(" "));
        let indent = usage.find(' ').map_or(0, |i| i + 1);
        wrap(&usage, self.width, indent).join("\n")
    }

    /// Render the table of options and their descriptions.
    pub fn render_options(&self, options: &Options) -> String {
        let rows: Vec<(String, &str)> = sorted(options.options())
            .into_iter()
            .map(|option| (self.option_row(option), option.description().unwrap_or("")))
            .collect();
        let max = match rows.iter().map(|(row, _)| row.chars().count()).max() {
            Some(max) => max,
            None => return String::default(),
        };
        let left = match LeftWidth::new(max) {
            Ok(left) => left,
            Err(_) => unreachable!("internal error - an option row is never empty"),
        };
        let renderer = ColumnRenderer::guided(
            PaddingWidth(self.desc_padding),
            left,
            TotalWidth(self.width),
        );

        rows.iter()
            .flat_map(|(row, description)| renderer.render(row, description))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Render the full help: usage line, header, option table, then footer.
    ///
    /// When `auto_usage` is set, the usage line is generated from the catalog with `syntax` as the application name.
    /// Otherwise `syntax` is shown as given.
    pub fn render_help(
        &self,
        syntax: &str,
        header: Option<&str>,
        options: &Options,
        footer: Option<&str>,
        auto_usage: bool,
    ) -> Result<String, ConfigError> {
        if syntax.is_empty() {
            return Err(ConfigError::EmptySyntax);
        }

        let mut lines = Vec::default();

        if auto_usage {
            lines.push(self.render_usage(syntax, options));
        } else {
            let indent = self.syntax_prefix.chars().count()
                + syntax.find(' ').map_or(0, |i| i + 1);
            lines.extend(wrap(
                &format!("{}{syntax}", self.syntax_prefix),
                self.width,
                indent,
            ));
        }

        if let Some(header) = header.filter(|h| !h.trim().is_empty()) {
            lines.extend(self.paragraph(header));
        }

        lines.push(self.render_options(options));

        if let Some(footer) = footer.filter(|f| !f.trim().is_empty()) {
            lines.extend(self.paragraph(footer));
        }

        Ok(lines.join("\n"))
    }

    /// Print the full help to the console.
    /// See [`HelpFormatter::render_help`].
    pub fn print_help(
        &self,
        syntax: &str,
        header: Option<&str>,
        options: &Options,
        footer: Option<&str>,
        auto_usage: bool,
    ) -> Result<(), ConfigError> {
        self.print_help_to(
            syntax,
            header,
            options,
            footer,
            auto_usage,
            &ConsoleInterface::default(),
        )
    }

    pub(crate) fn print_help_to(
        &self,
        syntax: &str,
        header: Option<&str>,
        options: &Options,
        footer: Option<&str>,
        auto_usage: bool,
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<(), ConfigError> {
        let help = self.render_help(syntax, header, options, footer, auto_usage)?;
        user_interface.print(help);
        Ok(())
    }

    fn paragraph(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::default();

        for line in text.lines() {
            let wrapped = wrap(line, self.width, 0);

            if wrapped.is_empty() {
                lines.push(String::default());
            } else {
                lines.extend(wrapped);
            }
        }

        lines
    }

    fn group_clause(&self, group: &OptionGroup) -> String {
        let members = sorted(group.options())
            .into_iter()
            // Requirement is shown at the group level.
            .map(|option| self.option_clause(option, true))
            .collect::<Vec<String>>()
            .join(" | ");

        if group.is_required() {
            members
        } else {
            format!("[{members}]")
        }
    }

    fn option_clause(&self, option: &CliOption, required: bool) -> String {
        let mut clause = match option.short() {
            Some(short) => format!("{DEFAULT_OPT_PREFIX}{short}"),
            None => format!("{DEFAULT_LONG_OPT_PREFIX}{}", option.key()),
        };

        if option.has_arg() && option.arg_name() != Some("") {
            let separator = if option.short().is_some() {
                " "
            } else {
                self.long_opt_separator.as_str()
            };
            clause.push_str(&format!("{separator}<{}>", self.arg_name_of(option)));
        }

        if required {
            clause
        } else {
            format!("[{clause}]")
        }
    }

    // Ex: " -a,--all <arg>", "    --long <arg>"
    fn option_row(&self, option: &CliOption) -> String {
        let mut row = format!("{:width$}", "", width = self.left_padding);

        match (option.short(), option.long()) {
            (Some(short), Some(long)) => {
                row.push_str(&format!("{DEFAULT_OPT_PREFIX}{short},{DEFAULT_LONG_OPT_PREFIX}{long}"))
            }
            (Some(short), None) => row.push_str(&format!("{DEFAULT_OPT_PREFIX}{short}")),
            (None, _) => row.push_str(&format!("   {DEFAULT_LONG_OPT_PREFIX}{}", option.key())),
        }

        if option.has_arg() {
            if option.arg_name() == Some("") {
                row.push(' ');
            } else {
                let separator = if option.has_long() {
                    self.long_opt_separator.as_str()
                } else {
                    " "
                };
                row.push_str(&format!("{separator}<{}>", self.arg_name_of(option)));
            }
        }

        row
    }

    fn arg_name_of<'a>(&'a self, option: &'a CliOption) -> &'a str {
        option.arg_name().unwrap_or(&self.arg_name)
    }
}

/// Order by key, ignoring case.
fn sorted(options: &[CliOption]) -> Vec<&CliOption> {
    let mut sorted: Vec<&CliOption> = options.iter().collect();
    sorted.sort_by(|a, b| {
        a.key()
            .to_lowercase()
            .cmp(&b.key().to_lowercase())
            .then_with(|| a.key().cmp(b.key()))
    });
    sorted
}
