use std::collections::HashMap;
use std::time::Duration;

use crate::compile;
use crate::language::{Kind, RunListItem, Scenario, Task, TypedElement};
use crate::markdown::{self, BlockToken};
use crate::parsing::validate::validate_references;
use crate::problem::Diagnostic;

/// The prefix that marks a line inside a task as a special reference,
/// as in `-> @check: [description](#id)`.
const REFERENCE_MARKER: &str = "-> @";

/// Configuration for a [`ScenarioParser`]. The grammar itself has no
/// knobs; the timeout is carried for the tooling that later executes
/// what a scenario describes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParserOptions {
    pub timeout: Duration,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            timeout: Duration::from_secs(30),
        }
    }
}

/// A reusable compiler handle. Holds only immutable configuration, never
/// document state; every call to [`ScenarioParser::parse`] works on a
/// fresh scenario and walk state, so one instance can run any number of
/// independent parses.
#[derive(Clone, Debug, Default)]
pub struct ScenarioParser {
    options: ParserOptions,
}

impl ScenarioParser {
    pub fn new() -> ScenarioParser {
        ScenarioParser {
            options: ParserOptions::default(),
        }
    }

    pub fn with_options(options: ParserOptions) -> ScenarioParser {
        ScenarioParser { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Run both compiler passes over the given text.
    pub fn parse(&self, content: &str) -> Parsed {
        let tokens = markdown::tokenize(content);

        let mut walk = Walk::new();
        for token in &tokens {
            walk.process(token);
        }

        let Walk { scenario, state } = walk;
        let warnings = state.warnings;
        let mut errors = state.errors;

        validate_references(&scenario, &mut errors);

        Parsed {
            scenario,
            warnings,
            errors,
        }
    }
}

/// The outcome of a parse: the scenario plus the two ordered diagnostic
/// sequences. Diagnostics are advisory; a populated `errors` list still
/// comes with a complete scenario for whatever could be salvaged.
#[derive(Debug, Eq, PartialEq)]
pub struct Parsed {
    pub scenario: Scenario,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl Parsed {
    pub fn is_clean(&self) -> bool {
        self.warnings
            .is_empty()
            && self
                .errors
                .is_empty()
    }
}

/// Which top-level section the walk is currently in. Unrecognized
/// sections swallow their tokens without producing anything.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Section {
    #[default]
    Unknown,
    Scenario,
    Typed(Kind),
}

/// Working state for the first pass, owned by one parse call and
/// discarded once the token walk completes.
#[derive(Debug, Default)]
struct WalkState {
    section: Section,
    in_task_section: bool,
    in_solution: bool,
    in_content_run: bool,
    inside_list: bool,
    expect_code_block: bool,
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
}

/// The first pass: a state-machine fold over the block tokens that builds
/// the scenario.
#[derive(Debug, Default)]
struct Walk {
    scenario: Scenario,
    state: WalkState,
}

impl Walk {
    fn new() -> Walk {
        Walk::default()
    }

    /// Route one token. Depth-1 headings switch sections unconditionally;
    /// everything else goes to the handler for the current section.
    fn process(&mut self, token: &BlockToken) {
        if let BlockToken::Heading { depth: 1, text, .. } = token {
            self.state
                .section = match text.as_str() {
                "Scenario" => Section::Scenario,
                other => match Kind::from_section(other) {
                    Some(kind) => Section::Typed(kind),
                    None => Section::Unknown,
                },
            };
            self.state
                .in_task_section = false;
            // neither a solution block nor a content run survives a
            // section change
            self.state
                .in_solution = false;
            self.state
                .in_content_run = false;
            return;
        }

        match self
            .state
            .section
        {
            Section::Scenario => self.scenario_token(token),
            Section::Typed(kind) => self.section_token(kind, token),
            Section::Unknown => {}
        }
    }

    /// Handle one token inside the Scenario section.
    fn scenario_token(&mut self, token: &BlockToken) {
        // H2 opens a new task
        if let BlockToken::Heading { depth: 2, text, .. } = token {
            if text
                .trim()
                .is_empty()
            {
                self.state
                    .warnings
                    .push(Diagnostic::EmptyTaskHeading);
            }
            self.scenario
                .tasks
                .push(Task {
                    id: text.clone(),
                    description: String::new(),
                    run_list: Vec::new(),
                });
            self.state
                .in_task_section = true;
            self.state
                .in_solution = false;
            self.state
                .in_content_run = false;
            return;
        }

        // Subheadings toggle solution mode on H3 and end any open run of
        // narrative content, but contribute no run-list item themselves.
        if let BlockToken::Heading { depth, text, .. } = token {
            if *depth == 3 {
                self.state
                    .in_solution = text == "Solution";
            }
            self.state
                .in_content_run = false;
            return;
        }

        // A paragraph opening with the marker holds one reference per
        // marker-prefixed line; anything else in it is ignored.
        if let BlockToken::Paragraph { text, .. } = token {
            if text.starts_with(REFERENCE_MARKER) {
                for line in text.split('\n') {
                    if line.starts_with(REFERENCE_MARKER) {
                        self.read_reference(line);
                    }
                }
                return;
            }
        }

        self.append_content(token);
    }

    /// Parse one `-> @kind: [description](#id)` line and append it to the
    /// current task. Checks are ordered colon, kind, link pattern; each
    /// failure has its own diagnostic and drops the line.
    fn read_reference(&mut self, line: &str) {
        let colon = match line.find(':') {
            Some(colon) => colon,
            None => {
                self.state
                    .warnings
                    .push(Diagnostic::MissingColon);
                return;
            }
        };

        let name = &line[REFERENCE_MARKER.len()..colon];
        let body = line[colon + 1..].trim();

        let kind = match Kind::from_reference(name) {
            Some(kind) => kind,
            None => {
                self.state
                    .errors
                    .push(Diagnostic::UnknownReferenceKind(name.to_string()));
                return;
            }
        };

        let pattern = compile!(r"\[(.*)\]\(#(.*)\)");
        let captures = match pattern.captures(body) {
            Some(captures) => captures,
            None => {
                self.state
                    .errors
                    .push(Diagnostic::MalformedReferenceLink);
                return;
            }
        };

        // A well-formed reference outside any task is legal markdown; it
        // just has nothing to attach to.
        if !self
            .state
            .in_task_section
        {
            return;
        }

        let item = RunListItem::Reference {
            kind,
            id: captures[2].to_string(),
            description: captures[1].to_string(),
            params: HashMap::new(),
            solution: self
                .state
                .in_solution,
        };

        if let Some(task) = self
            .scenario
            .tasks
            .last_mut()
        {
            task.run_list
                .push(item);
        }
    }

    /// Accumulate narrative content onto the current task. Adjacent
    /// content in one uninterrupted run concatenates onto the trailing
    /// item; an intervening heading starts a new one. Content arriving
    /// before the first task heading has nowhere to go and is dropped.
    fn append_content(&mut self, token: &BlockToken) {
        let markdown = match token.markdown() {
            Some(markdown) => markdown,
            None => return,
        };

        let task = match self
            .scenario
            .tasks
            .last_mut()
        {
            Some(task) => task,
            None => return,
        };

        let run = self
            .state
            .in_content_run;

        match task
            .run_list
            .last_mut()
        {
            Some(RunListItem::Content { content }) if run => {
                if !content.ends_with('\n') {
                    content.push('\n');
                }
                content.push_str(markdown);
            }
            _ => task
                .run_list
                .push(RunListItem::Content {
                    content: markdown.to_string(),
                }),
        }

        self.state
            .in_content_run = true;
    }

    /// Handle one token inside a typed section.
    fn section_token(&mut self, kind: Kind, token: &BlockToken) {
        match token {
            // H2 opens a new element
            BlockToken::Heading { depth: 2, text, .. } => {
                if text
                    .trim()
                    .is_empty()
                {
                    self.state
                        .errors
                        .push(Diagnostic::EmptyElementHeading(kind));
                }
                self.scenario
                    .elements_mut(kind)
                    .push(TypedElement {
                        kind,
                        id: text.clone(),
                        params: HashMap::new(),
                    });
                self.state
                    .in_task_section = true;
            }
            BlockToken::ListStart => {
                self.state
                    .inside_list = true
            }
            BlockToken::ListEnd => {
                self.state
                    .inside_list = false
            }
            // A pending @codeblock swallows the next fenced block as the
            // element's command, replacing the placeholder.
            BlockToken::Code { text, .. }
                if self
                    .state
                    .expect_code_block =>
            {
                if let Some(element) = self
                    .scenario
                    .elements_mut(kind)
                    .last_mut()
                {
                    element
                        .params
                        .insert("command".to_string(), text.clone());
                }
                self.state
                    .expect_code_block = false;
            }
            BlockToken::Text { text, .. }
                if self
                    .state
                    .inside_list =>
            {
                self.read_parameter(kind, text)
            }
            _ => {}
        }
    }

    /// Parse one `key: value` list item onto the current element. Items
    /// without a colon are ignored; a key with an embedded space is
    /// warned about and not stored.
    fn read_parameter(&mut self, kind: Kind, text: &str) {
        let colon = match text.find(':') {
            Some(colon) => colon,
            None => return,
        };

        let key = &text[..colon];
        let value = strip_value(&text[colon + 1..]);

        match key.find(' ') {
            Some(i) if i > 0 => {
                self.state
                    .warnings
                    .push(Diagnostic::SpaceInParameterKey(key.to_string()));
            }
            _ => {
                if let Some(element) = self
                    .scenario
                    .elements_mut(kind)
                    .last_mut()
                {
                    element
                        .params
                        .insert(key.to_string(), value.to_string());
                }
            }
        }

        // Signal the walk that the real value follows in a code block
        if value == "@codeblock" {
            self.state
                .expect_code_block = true;
        }
    }
}

/// Normalize a raw parameter value: drop leading whitespace, then strip
/// one layer of one matching quote style. At most one pass applies; a
/// mismatched or unquoted value comes back otherwise unchanged.
pub fn strip_value(content: &str) -> &str {
    let result = content.trim_start();
    for quote in ['`', '"', '\''] {
        if result.len() >= 2 && result.starts_with(quote) && result.ends_with(quote) {
            return &result[1..result.len() - 1];
        }
    }
    result
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn quoted_values_unwrap_once() {
        assert_eq!(strip_value("`bla`"), "bla");
        assert_eq!(strip_value("\"bla\""), "bla");
        assert_eq!(strip_value("'bla'"), "bla");
        assert_eq!(strip_value(" `ls -l`"), "ls -l");
    }

    #[test]
    fn unmatched_quoting_left_alone() {
        assert_eq!(strip_value("bla"), "bla");
        assert_eq!(strip_value("`bla"), "`bla");
        assert_eq!(strip_value("bla'"), "bla'");
        assert_eq!(strip_value("\"bla'"), "\"bla'");
        assert_eq!(strip_value("  spaced out "), "spaced out ");
    }

    #[test]
    fn degenerate_quotes() {
        assert_eq!(strip_value("`"), "`");
        assert_eq!(strip_value("''"), "");
    }
}
