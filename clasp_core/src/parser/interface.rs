use crate::parser::base::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(pub usize);

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // Room for one character and a hyphen.
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Renders a left column of option names next to a wrapped middle column of descriptions.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// Used when the left column leaves no usable room in the total width.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer whose middle column takes the remainder of the total width.
    pub(crate) fn guided(padding: PaddingWidth, left: LeftWidth, total_width: TotalWidth) -> Self {
        let non_middle: usize = left.0 + padding.0;

        match MiddleWidth::new(total_width.0.saturating_sub(non_middle)) {
            Ok(middle) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Columns {non_middle} fit within the total {}.  Selecting middle: {}.", total_width.0, middle.0);
                }

                Self::new(padding, left, middle)
            }
            Err(()) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Columns {non_middle} do not fit within the total {}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.", total_width.0);
                }

                Self::new(padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
            }
        }
    }

    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    /// Render one row, wrapping `middle` onto as many lines as needed.
    /// Trailing whitespace is removed from every line.
    pub(crate) fn render(&self, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding.0;
        let left_column_width = self.left.0;
        let middle_parts = chunk(middle, self.middle.0);
        let mut out = Vec::default();

        for (i, part) in middle_parts.iter().enumerate() {
            let line = if i == 0 {
                format!("{left:left_column_width$}{:padding$}{part}", "")
            } else {
                format!("{:left_column_width$}{:padding$}{part}", "", "")
            };
            out.push(line.trim_end().to_string());
        }

        if out.is_empty() {
            out.push(left.trim_end().to_string());
        }

        out
    }
}

/// Wrap `text` to `width`, indenting every line after the first by `indent`.
/// Lines are only broken between words; leading spaces of the first line are kept.
pub(crate) fn wrap(text: &str, width: usize, indent: usize) -> Vec<String> {
    // An indent that swallows the whole width would never make progress.
    let indent = if indent >= width { 1 } else { indent };
    let trimmed = text.trim_start_matches(' ');
    let mut lines: Vec<String> = Vec::default();
    let mut current = text[..text.len() - trimmed.len()].to_string();
    let mut started = false;

    for word in trimmed.split(' ').filter(|word| !word.is_empty()) {
        let available = if lines.is_empty() {
            width
        } else {
            width.saturating_sub(indent)
        };

        if !started {
            current.push_str(word);
            started = true;
        } else if current.chars().count() + word.chars().count() + 1 <= available {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if started {
        lines.push(current);
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line
            } else {
                format!("{:indent$}{line}", "")
            }
        })
        .collect()
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let chars: Vec<char> = word.chars().collect();
    let mut left = 0;
    let mut right = increment;

    while right + 1 < chars.len() {
        lines.push(format!("{}-", chars[left..right].iter().collect::<String>()));
        left += increment;
        right += increment;
    }

    current.extend(&chars[left..]);
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("Parse error: {error}");
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn renderer(padding: usize, left: usize, middle: usize) -> ColumnRenderer {
        ColumnRenderer::new(
            PaddingWidth(padding),
            LeftWidth::new(left).unwrap(),
            MiddleWidth::new(middle).unwrap(),
        )
    }

    #[test]
    fn column_renderer_rows() {
        let cr = renderer(3, 9, 20);

        assert_eq!(
            cr.render(" -v", "Verbose output."),
            vec![" -v         Verbose output.".to_string()]
        );
        assert_eq!(
            cr.render(" -a,--all", "  Show all  entries  "),
            vec![" -a,--all   Show all entries".to_string()]
        );
        assert_eq!(
            cr.render(" -f <arg>", "The input file, read once before anything else."),
            vec![
                " -f <arg>   The input file, read".to_string(),
                "            once before anything".to_string(),
                "            else.".to_string(),
            ]
        );
    }

    #[test]
    fn column_renderer_empty_middle() {
        let cr = renderer(3, 6, 10);

        assert_eq!(cr.render(" -a ", ""), vec![" -a".to_string()]);
        assert_eq!(cr.render(" -a", "   "), vec![" -a".to_string()]);
    }

    #[test]
    fn column_renderer_middle_overflow() {
        let cr = renderer(1, 2, 5);

        assert_eq!(
            cr.render("a", "abcdefghij"),
            vec![
                "a  abcd-".to_string(),
                "   efgh-".to_string(),
                "   ij".to_string(),
            ]
        );
    }

    #[rstest]
    #[case(2, 20, 17)]
    #[case(17, 20, 2)]
    #[case(18, 20, MINIMUM_MIDDLE_WIDTH)]
    #[case(39, 20, MINIMUM_MIDDLE_WIDTH)]
    fn guided(#[case] left: usize, #[case] total: usize, #[case] expected: usize) {
        let cr = ColumnRenderer::guided(
            PaddingWidth(1),
            LeftWidth::new(left).unwrap(),
            TotalWidth(total),
        );

        assert_eq!(cr.middle.0, expected);
    }

    #[rstest]
    #[case("", 10, 2, vec![])]
    #[case("usage: app", 80, 7, vec!["usage: app"])]
    #[case("usage: app [-a] [-b]", 15, 7, vec!["usage: app [-a]", "       [-b]"])]
    #[case("one two three four", 9, 2, vec!["one two", "  three", "  four"])]
    #[case("a b", 4, 10, vec!["a b"])]
    #[case("aaaa bbbb", 4, 10, vec!["aaaa", " bbbb"])]
    #[case("unbreakable word", 4, 0, vec!["unbreakable", "word"])]
    #[case("  Header1", 80, 0, vec!["  Header1"])]
    #[case("   ", 80, 0, vec![])]
    fn wrap_text(
        #[case] text: &str,
        #[case] width: usize,
        #[case] indent: usize,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(wrap(text, width, indent), expected);
    }

    #[rstest]
    #[case("", 5, vec![])]
    #[case("a b c", 5, vec!["a b c"])]
    #[case("a b c d", 5, vec!["a b c", "d"])]
    #[case("abcdefg", 4, vec!["abc-", "defg"])]
    #[case("abcdefghi", 4, vec!["abc-", "def-", "ghi"])]
    #[case("héllo wörld", 5, vec!["héllo", "wörld"])]
    fn chunk_paragraph(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }

    #[test]
    fn in_memory() {
        let interface = util::InMemoryInterface::default();
        interface.print("one".to_string());
        interface.print("two".to_string());

        assert_eq!(interface.consume_message(), "one\ntwo");
    }
}
