use crate::api::{strip_leading_hyphens, CliOption, Expected, GroupSelection, Options};
use crate::parser::{CommandLine, ParseError};
use crate::value::is_truthy;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

const END_OF_OPTIONS: &str = "--";

/// The state of a single parse.
///
/// Tokens are fed one at a time, in order.
/// Each token is classified as an option (short, long, burst, or with an attached value), a value for the current option, or a leftover argument.
/// The catalog is only ever read; everything a parse learns lives here until `close` hands it over as a [`CommandLine`].
#[derive(Debug)]
pub(crate) struct Tokenizer<'o> {
    catalog: &'o Options,
    stop_at_non_option: bool,
    command_line: CommandLine<'o>,
    // The occurrence receiving values, as a position in the command line.
    current: Option<usize>,
    skip_parsing: bool,
    expected: Vec<Expected>,
    selections: Vec<GroupSelection>,
}

impl<'o> Tokenizer<'o> {
    pub(crate) fn new(catalog: &'o Options, stop_at_non_option: bool) -> Self {
        Self {
            catalog,
            stop_at_non_option,
            command_line: CommandLine::new(catalog),
            current: None,
            skip_parsing: false,
            expected: catalog.expected(),
            selections: vec![GroupSelection::default(); catalog.groups().len()],
        }
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<(), ParseError> {
        if self.skip_parsing {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Token '{token}' after end of options, taking as argument.");
            }
            self.command_line.add_arg(token);
        } else if token == END_OF_OPTIONS {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("End of options.");
            }
            self.skip_parsing = true;
        } else if let Some(index) = self
            .current
            .filter(|_| self.current_accepts_arg() && self.is_argument(token))
        {
            self.add_value(index, strip_quotes(token))?;
        } else if token.starts_with(END_OF_OPTIONS) {
            self.handle_long_option(token)?;
        } else if token.starts_with('-') && token != "-" {
            self.handle_short_and_long_option(token)?;
        } else {
            self.handle_unknown_token(token)?;
        }

        if !self.current_accepts_arg() {
            self.current = None;
        }

        Ok(())
    }

    /// Finish the parse: apply `properties` as defaults, then check that every requirement was met.
    pub(crate) fn close<K, V>(
        mut self,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Result<CommandLine<'o>, ParseError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.check_required_args()?;

        for (name, value) in properties {
            self.handle_property(name.as_ref(), value.as_ref())?;
        }

        if !self.expected.is_empty() {
            return Err(ParseError::MissingOptions {
                missing: self
                    .expected
                    .iter()
                    .map(|expected| self.catalog.requirement(expected))
                    .collect(),
            });
        }

        let Tokenizer {
            mut command_line,
            selections,
            ..
        } = self;
        command_line.set_selections(
            selections
                .into_iter()
                .map(GroupSelection::into_selected)
                .collect(),
        );
        Ok(command_line)
    }

    fn handle_property(&mut self, name: &str, value: &str) -> Result<(), ParseError> {
        let catalog = self.catalog;
        let option = catalog
            .option(name)
            .ok_or_else(|| ParseError::UnrecognizedOption {
                option: name.to_string(),
            })?;
        let selected = catalog
            .group_index(name)
            .map_or(false, |index| self.selections[index].is_selected());

        if self.command_line.has_option(name) || selected {
            return Ok(());
        }

        if option.has_arg() {
            let index = self.handle_option(option)?;
            self.add_value(index, value)?;
        } else if is_truthy(value) {
            self.handle_option(option)?;
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Property '{name}' is not truthy, skipping.");
            }
        }

        self.current = None;
        Ok(())
    }

    fn handle_long_option(&mut self, token: &str) -> Result<(), ParseError> {
        if token.contains('=') {
            self.handle_long_option_with_equal(token)
        } else {
            self.handle_long_option_without_equal(token)
        }
    }

    // --L, -L, --l, -l
    fn handle_long_option_without_equal(&mut self, token: &str) -> Result<(), ParseError> {
        let mut matching = self.catalog.matching_options(token);

        match matching.len() {
            0 => self.handle_unknown_token(token),
            1 => {
                let option = self.declaration(&matching.remove(0));
                self.handle_option(option)?;
                Ok(())
            }
            _ => Err(ParseError::AmbiguousOption {
                option: token.to_string(),
                matching,
            }),
        }
    }

    // --L=V, -L=V, --l=V, -l=V
    fn handle_long_option_with_equal(&mut self, token: &str) -> Result<(), ParseError> {
        let (name, value) = match token.split_once('=') {
            Some(split) => split,
            None => return self.handle_long_option_without_equal(token),
        };
        let mut matching = self.catalog.matching_options(name);

        match matching.len() {
            0 => self.handle_unknown_token(token),
            1 => {
                let option = self.declaration(&matching.remove(0));

                if option.accepts_arg(0) {
                    self.handle_option_with_values(option, &[value])
                } else {
                    self.handle_unknown_token(token)
                }
            }
            _ => Err(ParseError::AmbiguousOption {
                option: name.to_string(),
                matching,
            }),
        }
    }

    fn handle_short_and_long_option(&mut self, token: &str) -> Result<(), ParseError> {
        let catalog = self.catalog;
        let t = strip_leading_hyphens(token);

        if t.chars().count() == 1 {
            // -S
            return if catalog.has_short_option(t) {
                self.handle_option(self.declaration(t))?;
                Ok(())
            } else {
                self.handle_unknown_token(token)
            };
        }

        match t.split_once('=') {
            Some((name, value)) => {
                if name.chars().count() == 1 {
                    // -S=V
                    match catalog.option(name) {
                        Some(option) if option.accepts_arg(0) => {
                            self.handle_option_with_values(option, &[value])
                        }
                        _ => self.handle_unknown_token(token),
                    }
                } else if let Some((option, key)) = self.property_option(name) {
                    // -SV1=V2 (-Dkey=value)
                    self.handle_option_with_values(option, &[key, value])
                } else {
                    // -L=V, -l=V
                    self.handle_long_option_with_equal(token)
                }
            }
            None => {
                if catalog.has_short_option(t) {
                    self.handle_option(self.declaration(t))?;
                    Ok(())
                } else if !catalog.matching_options(t).is_empty() {
                    // -L, -l
                    self.handle_long_option_without_equal(token)
                } else if let Some((option, value)) = self
                    .long_prefix(t)
                    .map(|(prefix, value)| (self.declaration(prefix), value))
                    .filter(|(option, _)| option.accepts_arg(0))
                {
                    // -LV (-Xmx512m)
                    self.handle_option_with_values(option, &[value])
                } else if let Some((option, value)) = self.property_option(t) {
                    // -SV (-Dflag)
                    self.handle_option_with_values(option, &[value])
                } else {
                    // -S1S2S3, -S1S2V
                    self.handle_concatenated_options(token)
                }
            }
        }
    }

    fn handle_concatenated_options(&mut self, token: &str) -> Result<(), ParseError> {
        let catalog = self.catalog;

        for (position, (offset, ch)) in token.char_indices().enumerate().skip(1) {
            let name = ch.to_string();

            if catalog.has_option(&name) {
                let index = self.handle_option(self.declaration(&name))?;
                let trail = &token[offset + ch.len_utf8()..];

                if self.current.is_some() && !trail.is_empty() {
                    self.add_value(index, trail)?;
                    break;
                }
            } else {
                let unknown = if self.stop_at_non_option && position > 1 {
                    &token[offset..]
                } else {
                    token
                };
                self.handle_unknown_token(unknown)?;
                break;
            }
        }

        Ok(())
    }

    fn handle_unknown_token(&mut self, token: &str) -> Result<(), ParseError> {
        if token.starts_with('-') && token.chars().count() > 1 && !self.stop_at_non_option {
            return Err(ParseError::UnrecognizedOption {
                option: token.to_string(),
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token '{token}' taken as argument.");
        }
        self.command_line.add_arg(token);

        if self.stop_at_non_option {
            self.skip_parsing = true;
        }

        Ok(())
    }

    /// Record an occurrence of `option`, returning its position in the command line.
    fn handle_option(&mut self, option: &'o CliOption) -> Result<usize, ParseError> {
        self.check_required_args()?;
        self.update_required_options(option)?;
        let index = self.command_line.add_option(option);
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched option '{}'.", option.key());
        }

        self.current = if option.has_arg() { Some(index) } else { None };
        Ok(index)
    }

    fn handle_option_with_values(
        &mut self,
        option: &'o CliOption,
        values: &[&str],
    ) -> Result<(), ParseError> {
        let index = self.handle_option(option)?;

        for value in values {
            self.add_value(index, value)?;
        }

        self.current = None;
        Ok(())
    }

    fn update_required_options(&mut self, option: &'o CliOption) -> Result<(), ParseError> {
        let catalog = self.catalog;
        let key = option.key();

        if option.is_required() {
            self.expected
                .retain(|expected| !matches!(expected, Expected::Option(k) if k == key));
        }

        if let Some(index) = catalog.group_index(key) {
            let group = &catalog.groups()[index];

            if group.is_required() {
                self.expected
                    .retain(|expected| expected != &Expected::Group(index));
            }

            self.selections[index].select(group, key)?;
        }

        Ok(())
    }

    fn check_required_args(&self) -> Result<(), ParseError> {
        match self.current.map(|index| self.command_line.matched(index)) {
            Some(matched) if matched.requires_arg() => Err(ParseError::MissingArgument {
                option: matched.option().key().to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn add_value(&mut self, index: usize, value: &str) -> Result<(), ParseError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Value '{value}' for option at {index}.");
        }
        self.command_line.matched_mut(index).add_value(value)
    }

    fn current_accepts_arg(&self) -> bool {
        self.current
            .map_or(false, |index| self.command_line.matched(index).accepts_arg())
    }

    fn is_argument(&self, token: &str) -> bool {
        !self.is_option(token) || is_number(token)
    }

    fn is_option(&self, token: &str) -> bool {
        self.is_long_option(token) || self.is_short_option(token)
    }

    // -S, -SV, -S=V, -SV1=V2, -S1S2
    fn is_short_option(&self, token: &str) -> bool {
        token.starts_with('-')
            && token
                .chars()
                .nth(1)
                .map_or(false, |ch| self.catalog.has_short_option(&ch.to_string()))
    }

    // --L, -L, --L=V, -L=V, --l, --l=V, -LV
    fn is_long_option(&self, token: &str) -> bool {
        if !token.starts_with('-') || token.chars().count() == 1 {
            return false;
        }

        let name = token.split_once('=').map_or(token, |(name, _)| name);

        !self.catalog.matching_options(name).is_empty()
            || (self.long_prefix(token).is_some() && !token.starts_with(END_OF_OPTIONS))
    }

    /// The longest declared long name which is a proper prefix of `token`, leaving at least two characters after it.
    /// Returns the long name along with the remainder.
    fn long_prefix<'t>(&self, token: &'t str) -> Option<(&'t str, &'t str)> {
        let t = strip_leading_hyphens(token);
        let boundaries: Vec<usize> = t.char_indices().map(|(offset, _)| offset).collect();

        (2..boundaries.len().saturating_sub(1))
            .rev()
            .map(|count| t.split_at(boundaries[count]))
            .find(|(prefix, _)| self.catalog.has_long_option(prefix))
    }

    /// The option named by the first character of `t` when it takes `key=value` pairs, along with the remainder.
    fn property_option<'t>(&self, t: &'t str) -> Option<(&'o CliOption, &'t str)> {
        let catalog = self.catalog;
        let first = t.chars().next()?;

        catalog
            .option(&first.to_string())
            .filter(|option| option.is_property_style())
            .map(|option| (option, &t[first.len_utf8()..]))
    }

    fn declaration(&self, name: &str) -> &'o CliOption {
        let catalog = self.catalog;

        match catalog.option(name) {
            Some(option) => option,
            None => unreachable!("internal error - matched option '{name}' must be declared"),
        }
    }
}

/// Decimal numbers only: `inf` and `nan` spellings are not numbers here.
fn is_number(token: &str) -> bool {
    let unsigned = token
        .strip_prefix(|ch: char| ch == '-' || ch == '+')
        .unwrap_or(token);

    unsigned
        .chars()
        .next()
        .map_or(false, |ch| ch.is_ascii_digit() || ch == '.')
        && token.parse::<f64>().is_ok()
}

/// Remove one pair of surrounding double quotes, unless the inner text contains another.
fn strip_quotes(token: &str) -> &str {
    match token
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) if !inner.contains('"') => inner,
        _ => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OptionGroup;
    use crate::parser::Requirement;
    use rstest::rstest;

    fn catalog() -> Options {
        let mut catalog = Options::default();
        catalog
            .add("a", Some("enable-a"), false, "turn [a] on or off")
            .unwrap()
            .add("b", Some("bfile"), true, "set the value of [b]")
            .unwrap()
            .add("c", Some("copt"), false, "turn [c] on or off")
            .unwrap();
        catalog
    }

    fn parse<'o>(catalog: &'o Options, tokens: &[&str]) -> Result<CommandLine<'o>, ParseError> {
        parse_mode(catalog, tokens, false)
    }

    fn parse_mode<'o>(
        catalog: &'o Options,
        tokens: &[&str],
        stop_at_non_option: bool,
    ) -> Result<CommandLine<'o>, ParseError> {
        let mut tokenizer = Tokenizer::new(catalog, stop_at_non_option);

        for token in tokens {
            tokenizer.feed(token)?;
        }

        tokenizer.close(std::iter::empty::<(&str, &str)>())
    }

    #[rstest]
    #[case("\"foo\"", "foo")]
    #[case("\"foo bar\"", "foo bar")]
    #[case("\"", "\"")]
    #[case("\"\"", "")]
    #[case("\"a\"b\"", "\"a\"b\"")]
    #[case("foo\"", "foo\"")]
    #[case("foo", "foo")]
    fn quotes(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(strip_quotes(token), expected);
    }

    #[rstest]
    #[case("-Xmx512m", Some(("Xmx", "512m")))]
    #[case("-Xmx51", Some(("Xmx", "51")))]
    #[case("-Xmx5", None)]
    #[case("-Xmx", None)]
    #[case("--Xmx512m", Some(("Xmx", "512m")))]
    #[case("-X", None)]
    #[case("-", None)]
    fn long_prefix(#[case] token: &str, #[case] expected: Option<(&str, &str)>) {
        let mut catalog = Options::default();
        catalog.add_option(CliOption::long_only("Xmx").has_arg().build().unwrap());
        let tokenizer = Tokenizer::new(&catalog, false);

        assert_eq!(tokenizer.long_prefix(token), expected);
    }

    #[test]
    fn simple_short() {
        let catalog = catalog();
        let command_line = parse(&catalog, &["-a", "-b", "toast", "foo", "bar"]).unwrap();

        assert!(command_line.has_option("a"));
        assert_eq!(command_line.option_value("b"), Some("toast"));
        assert_eq!(command_line.args(), vec!["foo", "bar"]);
    }

    #[test]
    fn simple_long() {
        let catalog = catalog();
        let command_line =
            parse(&catalog, &["--enable-a", "--bfile", "toast", "foo", "bar"]).unwrap();

        assert!(command_line.has_option("a"));
        assert_eq!(command_line.option_value("b"), Some("toast"));
        assert_eq!(command_line.option_value("bfile"), Some("toast"));
        assert_eq!(command_line.args(), vec!["foo", "bar"]);
    }

    #[rstest]
    #[case(vec!["-b=toast"])]
    #[case(vec!["--bfile=toast"])]
    #[case(vec!["-bfile=toast"])]
    #[case(vec!["-btoast"])]
    #[case(vec!["--bf", "toast"])]
    #[case(vec!["--bf=toast"])]
    #[case(vec!["-b", "\"toast\""])]
    fn attached_value(#[case] tokens: Vec<&str>) {
        let catalog = catalog();
        let command_line = parse(&catalog, &tokens).unwrap();

        assert_eq!(command_line.option_value("b"), Some("toast"));
    }

    #[test]
    fn burst() {
        let catalog = catalog();
        let command_line = parse(&catalog, &["-acbtoast", "foo"]).unwrap();

        assert!(command_line.has_option("a"));
        assert!(command_line.has_option("c"));
        assert_eq!(command_line.option_value("b"), Some("toast"));
        assert_eq!(command_line.args(), vec!["foo"]);
    }

    #[test]
    fn burst_then_value() {
        let catalog = catalog();
        let command_line = parse(&catalog, &["-ab", "toast", "foo"]).unwrap();

        assert!(command_line.has_option("a"));
        assert_eq!(command_line.option_value("b"), Some("toast"));
        assert_eq!(command_line.args(), vec!["foo"]);
    }

    #[rstest]
    #[case(vec!["-ax"], "-ax")]
    #[case(vec!["-x"], "-x")]
    #[case(vec!["--zop"], "--zop")]
    #[case(vec!["-a", "--zop=1"], "--zop=1")]
    #[case(vec!["--enable-a=1"], "--enable-a=1")]
    #[case(vec!["-a=1"], "-a=1")]
    #[case(vec!["-=1"], "-=1")]
    #[case(vec!["--=1"], "--=1")]
    fn unrecognized(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        let catalog = catalog();
        assert_matches!(
            parse(&catalog, &tokens),
            Err(ParseError::UnrecognizedOption { option }) if option == expected
        );
    }

    #[test]
    fn unrecognized_stop_at_non_option() {
        let catalog = catalog();
        let command_line =
            parse_mode(&catalog, &["-a", "-z", "-c", "foo"], true).unwrap();

        assert!(command_line.has_option("a"));
        assert!(!command_line.has_option("c"));
        assert_eq!(command_line.args(), vec!["-z", "-c", "foo"]);
    }

    #[test]
    fn burst_stop_at_non_option() {
        let catalog = catalog();
        let command_line = parse_mode(&catalog, &["-azc", "-b", "x"], true).unwrap();

        assert!(command_line.has_option("a"));
        assert!(!command_line.has_option("c"));
        assert_eq!(command_line.args(), vec!["zc", "-b", "x"]);
    }

    #[test]
    fn stop_at_first_argument() {
        let catalog = catalog();
        let command_line =
            parse_mode(&catalog, &["-c", "foober", "-b", "toast"], true).unwrap();

        assert!(command_line.has_option("c"));
        assert_eq!(command_line.args(), vec!["foober", "-b", "toast"]);
    }

    #[test]
    fn double_dash() {
        let catalog = catalog();
        let command_line = parse(&catalog, &["--copt", "--", "-b", "toast", "--"]).unwrap();

        assert!(command_line.has_option("c"));
        assert!(!command_line.has_option("b"));
        assert_eq!(command_line.args(), vec!["-b", "toast", "--"]);
    }

    #[test]
    fn single_dash() {
        let catalog = catalog();
        let command_line = parse(&catalog, &["--copt", "-b", "-", "-a", "-"]).unwrap();

        assert_eq!(command_line.option_value("b"), Some("-"));
        assert!(command_line.has_option("a"));
        assert_eq!(command_line.args(), vec!["-"]);
    }

    #[rstest]
    #[case(vec!["-b"])]
    #[case(vec!["-b", "-a"])]
    #[case(vec!["-b", "--"])]
    #[case(vec!["--bfile"])]
    fn missing_argument(#[case] tokens: Vec<&str>) {
        let catalog = catalog();
        assert_eq!(
            parse(&catalog, &tokens),
            Err(ParseError::MissingArgument {
                option: "b".to_string()
            })
        );
    }

    #[test]
    fn negative_number() {
        let mut catalog = catalog();
        catalog.add("1", None, false, "one").unwrap();
        let command_line = parse(&catalog, &["-b", "-1"]).unwrap();

        assert_eq!(command_line.option_value("b"), Some("-1"));
        assert!(!command_line.has_option("1"));
    }

    #[rstest]
    #[case("-1", true)]
    #[case("-2.5", true)]
    #[case("+3", true)]
    #[case("-.5", true)]
    #[case("1e3", true)]
    #[case("-inf", false)]
    #[case("-Infinity", false)]
    #[case("-nan", false)]
    #[case("NaN", false)]
    #[case("-", false)]
    #[case("-1a", false)]
    fn number(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_number(token), expected);
    }

    #[rstest]
    #[case("-inf")]
    #[case("-nan")]
    fn non_finite_spelling_not_value(#[case] token: &str) {
        let mut catalog = catalog();
        catalog
            .add("i", None, false, "i")
            .unwrap()
            .add("n", None, false, "n")
            .unwrap()
            .add("f", None, false, "f")
            .unwrap();

        assert_eq!(
            parse(&catalog, &["-b", token]),
            Err(ParseError::MissingArgument {
                option: "b".to_string()
            })
        );
    }

    #[test]
    fn option_as_value_rejected() {
        let catalog = catalog();
        assert_eq!(
            parse(&catalog, &["-b", "-a"]),
            Err(ParseError::MissingArgument {
                option: "b".to_string()
            })
        );
    }

    #[test]
    fn unknown_dash_token_as_value() {
        let catalog = catalog();
        let command_line = parse(&catalog, &["-b", "-z"]).unwrap();
        assert_eq!(command_line.option_value("b"), Some("-z"));
    }

    #[test]
    fn ambiguous() {
        let mut catalog = Options::default();
        catalog
            .add_option(CliOption::long_only("prefix").build().unwrap())
            .add_option(CliOption::long_only("prefixplusplus").build().unwrap());

        assert_eq!(
            parse(&catalog, &["--pref"]),
            Err(ParseError::AmbiguousOption {
                option: "--pref".to_string(),
                matching: vec!["prefix".to_string(), "prefixplusplus".to_string()],
            })
        );
        assert_eq!(
            parse(&catalog, &["-pref=1"]),
            Err(ParseError::AmbiguousOption {
                option: "-pref".to_string(),
                matching: vec!["prefix".to_string(), "prefixplusplus".to_string()],
            })
        );

        let command_line = parse(&catalog, &["--prefix"]).unwrap();
        assert!(command_line.has_option("prefix"));
        assert!(!command_line.has_option("prefixplusplus"));
    }

    #[test]
    fn long_prefix_value() {
        let mut catalog = Options::default();
        catalog.add_option(CliOption::long_only("Xmx").has_arg().build().unwrap());
        let command_line = parse(&catalog, &["-Xmx512m"]).unwrap();

        assert_eq!(command_line.option_value("Xmx"), Some("512m"));
    }

    #[test]
    fn property_option() {
        let mut catalog = Options::default();
        catalog.add_option(
            CliOption::builder("D")
                .has_args()
                .default_value_separator()
                .build()
                .unwrap(),
        );
        let command_line = parse(&catalog, &["-Dparam1=value1", "-Dparam2", "-Dparam3=value3=x"]).unwrap();

        assert_eq!(
            command_line.option_values("D"),
            Some(vec!["param1", "value1", "param2", "param3", "value3", "x"])
        );
    }

    #[test]
    fn required_missing() {
        let mut catalog = catalog();
        catalog
            .add_option(CliOption::builder("x").required().build().unwrap())
            .add_option(CliOption::builder("y").required().build().unwrap());

        assert_eq!(
            parse(&catalog, &["-a", "-y"]),
            Err(ParseError::MissingOptions {
                missing: vec![Requirement::Option("x".to_string())],
            })
        );
        assert!(parse(&catalog, &["-x", "-y"]).is_ok());
    }

    #[test]
    fn group_exclusion() {
        let mut group = OptionGroup::default();
        group
            .add_option(CliOption::builder("f").long_opt("file").has_arg().build().unwrap())
            .add_option(CliOption::builder("d").long_opt("directory").build().unwrap());
        let mut catalog = catalog();
        catalog.add_option_group(group);

        let command_line = parse(&catalog, &["-f", "x", "-f", "y"]).unwrap();
        assert_eq!(command_line.group_selection("d"), Some("f"));
        assert_eq!(command_line.option_values("file"), Some(vec!["x", "y"]));

        assert_matches!(
            parse(&catalog, &["-f", "x", "--directory"]),
            Err(ParseError::AlreadySelected { selected, rejected, .. }) => {
                assert_eq!(selected, "f");
                assert_eq!(rejected, "d");
            }
        );

        let command_line = parse(&catalog, &["-a"]).unwrap();
        assert_eq!(command_line.group_selection("f"), None);
        assert_eq!(command_line.group_selection("a"), None);
    }

    #[test]
    fn group_required() {
        let mut group = OptionGroup::default();
        group
            .add_option(CliOption::builder("f").build().unwrap())
            .add_option(CliOption::builder("d").build().unwrap())
            .set_required(true);
        let mut catalog = Options::default();
        catalog.add_option_group(group);

        assert_matches!(
            parse(&catalog, &[]),
            Err(ParseError::MissingOptions { missing }) => {
                assert_eq!(missing.len(), 1);
                assert_matches!(&missing[0], Requirement::Group(_));
            }
        );
        assert!(parse(&catalog, &["-d"]).is_ok());
    }

    #[test]
    fn properties() {
        let mut catalog = catalog();
        catalog
            .add_option(CliOption::builder("x").required().build().unwrap())
            .add_option(CliOption::builder("e").long_opt("eee").has_arg().build().unwrap());
        let mut tokenizer = Tokenizer::new(&catalog, false);
        tokenizer.feed("-b").unwrap();
        tokenizer.feed("given").unwrap();

        let command_line = tokenizer
            .close(vec![
                ("a", "yes"),
                ("c", "nope"),
                ("x", "TRUE"),
                ("b", "ignored"),
                ("eee", "default"),
            ])
            .unwrap();

        assert!(command_line.has_option("a"));
        assert!(!command_line.has_option("c"));
        assert!(command_line.has_option("x"));
        assert_eq!(command_line.option_values("b"), Some(vec!["given"]));
        assert_eq!(command_line.option_value("e"), Some("default"));
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn properties_respect_groups(#[case] required: bool) {
        let mut group = OptionGroup::default();
        group
            .add_option(CliOption::builder("f").build().unwrap())
            .add_option(CliOption::builder("d").build().unwrap())
            .set_required(required);
        let mut catalog = Options::default();
        catalog.add_option_group(group);

        // A group already satisfied on the command line ignores properties for its other members.
        let mut tokenizer = Tokenizer::new(&catalog, false);
        tokenizer.feed("-f").unwrap();
        let command_line = tokenizer.close(vec![("d", "true")]).unwrap();

        assert!(command_line.has_option("f"));
        assert!(!command_line.has_option("d"));
        assert_eq!(command_line.group_selection("d"), Some("f"));

        // A property alone selects the member and meets the group requirement.
        let tokenizer = Tokenizer::new(&catalog, false);
        let command_line = tokenizer.close(vec![("d", "true")]).unwrap();

        assert!(command_line.has_option("d"));
        assert_eq!(command_line.group_selection("f"), Some("d"));
    }

    #[test]
    fn properties_unrecognized() {
        let catalog = catalog();
        let tokenizer = Tokenizer::new(&catalog, false);

        assert_eq!(
            tokenizer.close(vec![("zz", "1")]),
            Err(ParseError::UnrecognizedOption {
                option: "zz".to_string()
            })
        );
    }

    #[test]
    fn optional_arg() {
        let mut catalog = Options::default();
        catalog
            .add_option(CliOption::builder("o").optional_arg().build().unwrap())
            .add_option(CliOption::builder("a").build().unwrap());

        let command_line = parse(&catalog, &["-o", "-a"]).unwrap();
        assert!(command_line.has_option("o"));
        assert_eq!(command_line.option_value("o"), None);

        let command_line = parse(&catalog, &["-o", "value", "rest"]).unwrap();
        assert_eq!(command_line.option_value("o"), Some("value"));
        assert_eq!(command_line.args(), vec!["rest"]);
    }

    #[test]
    fn unlimited_args() {
        let mut catalog = catalog();
        catalog.add_option(CliOption::builder("e").has_args().build().unwrap());

        let command_line = parse(&catalog, &["-e", "one", "two", "-a", "three"]).unwrap();
        assert_eq!(command_line.option_values("e"), Some(vec!["one", "two"]));
        assert_eq!(command_line.args(), vec!["three"]);

        assert_eq!(
            parse(&catalog, &["-e"]),
            Err(ParseError::MissingArgument {
                option: "e".to_string()
            })
        );
    }
}
