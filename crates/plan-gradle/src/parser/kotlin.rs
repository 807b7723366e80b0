//! Parser for descriptor fragments in the Gradle Kotlin DSL.
//!
//! Line-based extraction with brace-depth block tracking. The parser
//! aborts on uninterpretable input (unknown plugins, bad coordinates,
//! unquoted scalar values) and records everything else it does not
//! understand as warnings, so forward-incompatible syntax never kills
//! a whole pipeline run.

use crate::error::GradleError;
use crate::parser::{KNOWN_PLUGINS, normalize_alias, parse_java_version, scope_for_configuration};
use plan_core::{
    Coordinate, DependencyRequest, FragmentParser, ParseWarning, ParsedFragment,
    ProjectDescriptor, Scope,
};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Matches: group = "value" / version = "value"
static RE_SCALAR_ASSIGN: OnceLock<Regex> = OnceLock::new();
/// Matches: sourceCompatibility = <token> / targetCompatibility = <token>
static RE_COMPAT_ASSIGN: OnceLock<Regex> = OnceLock::new();
/// Matches: id("plugin-id"), optionally with a version suffix
static RE_PLUGIN_ID: OnceLock<Regex> = OnceLock::new();
/// Matches: configuration(<argument>)
static RE_DEP_CALL: OnceLock<Regex> = OnceLock::new();

fn re_scalar_assign() -> &'static Regex {
    RE_SCALAR_ASSIGN.get_or_init(|| Regex::new(r#"^(group|version)\s*=\s*"([^"]*)"$"#).unwrap())
}

fn re_compat_assign() -> &'static Regex {
    RE_COMPAT_ASSIGN
        .get_or_init(|| Regex::new(r"^(sourceCompatibility|targetCompatibility)\s*=\s*(.+)$").unwrap())
}

fn re_plugin_id() -> &'static Regex {
    RE_PLUGIN_ID
        .get_or_init(|| Regex::new(r#"^id\("([^"]+)"\)(?:\s+version\s+"[^"]+")?$"#).unwrap())
}

fn re_dep_call() -> &'static Regex {
    RE_DEP_CALL.get_or_init(|| Regex::new(r"^(\w+)\((.+)\)$").unwrap())
}

/// Block context while scanning a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Plugins,
    Java,
    Repositories,
    Dependencies,
    /// tasks.withType<JavaCompile>
    CompileTask,
    /// tasks.withType<JavaExec>
    ExecTask,
    /// tasks.withType<Test>
    TestTask,
    /// tasks.test
    TestConfig,
    Unknown,
}

struct FragmentState {
    descriptor: ProjectDescriptor,
    warnings: Vec<ParseWarning>,
    preview_compile: bool,
    preview_exec: bool,
    preview_test: bool,
    /// Line of the first --enable-preview sighting, for the
    /// propagation warning.
    preview_line: usize,
}

impl FragmentState {
    fn new(origin: &str) -> Self {
        Self {
            descriptor: ProjectDescriptor::new(origin),
            warnings: Vec::new(),
            preview_compile: false,
            preview_exec: false,
            preview_test: false,
            preview_line: 0,
        }
    }

    fn warn(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        warn!(origin = %self.descriptor.origin, line, %message, "tolerated fragment oddity");
        self.warnings.push(ParseWarning {
            origin: self.descriptor.origin.clone(),
            line,
            message,
        });
    }
}

/// Parses Kotlin DSL descriptor fragments into [`ProjectDescriptor`]s.
pub struct KotlinDslParser;

impl FragmentParser for KotlinDslParser {
    fn parse(&self, content: &str, origin: &str) -> plan_core::Result<ParsedFragment> {
        parse_kotlin_dsl(content, origin)
    }
}

pub fn parse_kotlin_dsl(content: &str, origin: &str) -> plan_core::Result<ParsedFragment> {
    let mut state = FragmentState::new(origin);
    let mut stack: Vec<Block> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_line_comment(raw).trim();
        if line.is_empty() || line.starts_with("/*") || line.starts_with('*') {
            continue;
        }

        // One-liner block: "header { body }"
        if let Some(open) = line.find('{')
            && open > 0
            && line.ends_with('}')
        {
            let header = line[..open].trim();
            let body = line[open + 1..line.len() - 1].trim();
            let block = classify_block(header, stack.last().copied(), &mut state, line_no);
            if !body.is_empty() {
                handle_statement(block, body, line_no, origin, &mut state)?;
            }
            continue;
        }

        if let Some(header) = line.strip_suffix('{') {
            let block = classify_block(header.trim(), stack.last().copied(), &mut state, line_no);
            stack.push(block);
            continue;
        }

        if line == "}" {
            stack.pop();
            continue;
        }

        match stack.last().copied() {
            Some(block) => handle_statement(block, line, line_no, origin, &mut state)?,
            None => top_level_statement(line, line_no, origin, &mut state)?,
        }
    }

    finish_preview_flags(&mut state);

    Ok(ParsedFragment {
        descriptor: state.descriptor,
        warnings: state.warnings,
    })
}

fn classify_block(
    header: &str,
    parent: Option<Block>,
    state: &mut FragmentState,
    line_no: usize,
) -> Block {
    // Nested blocks inside task or opaque blocks keep the enclosing
    // context, so e.g. `options { }` under a compile task still catches
    // preview flags.
    match parent {
        Some(
            block @ (Block::CompileTask
            | Block::ExecTask
            | Block::TestTask
            | Block::TestConfig
            | Block::Repositories
            | Block::Unknown),
        ) => return block,
        _ => {}
    }

    match header {
        "plugins" => Block::Plugins,
        "java" => Block::Java,
        "repositories" => Block::Repositories,
        "dependencies" => Block::Dependencies,
        "tasks.test" => Block::TestConfig,
        _ if header.starts_with("tasks.withType<JavaCompile>") => Block::CompileTask,
        _ if header.starts_with("tasks.withType<JavaExec>") => Block::ExecTask,
        _ if header.starts_with("tasks.withType<Test>") => Block::TestTask,
        _ => {
            state.warn(line_no, format!("unknown block '{header}'"));
            Block::Unknown
        }
    }
}

fn handle_statement(
    block: Block,
    line: &str,
    line_no: usize,
    origin: &str,
    state: &mut FragmentState,
) -> plan_core::Result<()> {
    match block {
        Block::Plugins => plugin_statement(line, line_no, origin),
        Block::Java => {
            if let Some(result) = try_compat_assignment(line, line_no, origin, state) {
                return result;
            }
            state.warn(line_no, format!("unknown declaration '{line}'"));
            Ok(())
        }
        Block::Dependencies => dependency_statement(line, line_no, origin, state),
        Block::CompileTask => {
            if line.contains("--enable-preview") {
                state.preview_compile = true;
                if state.preview_line == 0 {
                    state.preview_line = line_no;
                }
            }
            Ok(())
        }
        Block::ExecTask => {
            if line.contains("--enable-preview") {
                state.preview_exec = true;
                if state.preview_line == 0 {
                    state.preview_line = line_no;
                }
            }
            Ok(())
        }
        Block::TestTask => {
            if line.contains("--enable-preview") {
                state.preview_test = true;
                if state.preview_line == 0 {
                    state.preview_line = line_no;
                }
            }
            if line.contains("useJUnitPlatform()") {
                state.descriptor.junit_platform = Some(true);
            }
            Ok(())
        }
        Block::TestConfig => {
            if line.contains("useJUnitPlatform()") {
                state.descriptor.junit_platform = Some(true);
            }
            Ok(())
        }
        Block::Repositories | Block::Unknown => Ok(()),
    }
}

fn top_level_statement(
    line: &str,
    line_no: usize,
    origin: &str,
    state: &mut FragmentState,
) -> plan_core::Result<()> {
    if let Some(caps) = re_scalar_assign().captures(line) {
        let value = caps.get(2).map_or("", |m| m.as_str()).to_string();
        match caps.get(1).map_or("", |m| m.as_str()) {
            "group" => state.descriptor.group = Some(value),
            _ => state.descriptor.version = Some(value),
        }
        return Ok(());
    }

    // An assignment to group/version that did not match the quoted form
    // means the fragment cannot be interpreted.
    if is_assignment_to(line, "group") || is_assignment_to(line, "version") {
        return Err(GradleError::ParseError {
            message: format!("expected a quoted value in '{line}'"),
        }
        .into_malformed_at(origin, line_no));
    }

    if let Some(result) = try_compat_assignment(line, line_no, origin, state) {
        return result;
    }

    state.warn(line_no, format!("unknown declaration '{line}'"));
    Ok(())
}

/// `Some(result)` when the line is a source/target compatibility
/// assignment, `None` when it is something else entirely.
fn try_compat_assignment(
    line: &str,
    line_no: usize,
    origin: &str,
    state: &mut FragmentState,
) -> Option<plan_core::Result<()>> {
    let caps = re_compat_assign().captures(line)?;
    let token = caps.get(2).map_or("", |m| m.as_str());
    let level = match parse_java_version(token) {
        Ok(level) => level,
        Err(err) => return Some(Err(err.into_malformed_at(origin, line_no))),
    };
    if caps.get(1).map_or("", |m| m.as_str()) == "sourceCompatibility" {
        state.descriptor.language.source = Some(level);
    } else {
        state.descriptor.language.target = Some(level);
    }
    Some(Ok(()))
}

fn plugin_statement(line: &str, line_no: usize, origin: &str) -> plan_core::Result<()> {
    let id = if let Some(caps) = re_plugin_id().captures(line) {
        caps.get(1).map_or("", |m| m.as_str()).to_string()
    } else {
        // Bare accessor form: `java`, or backtick-quoted ids.
        line.trim_matches('`').to_string()
    };

    if KNOWN_PLUGINS.contains(&id.as_str()) {
        Ok(())
    } else {
        Err(GradleError::UnknownPlugin { id }.into_malformed_at(origin, line_no))
    }
}

fn dependency_statement(
    line: &str,
    line_no: usize,
    origin: &str,
    state: &mut FragmentState,
) -> plan_core::Result<()> {
    let Some(caps) = re_dep_call().captures(line) else {
        state.warn(line_no, format!("unrecognized dependency declaration '{line}'"));
        return Ok(());
    };
    let configuration = caps.get(1).map_or("", |m| m.as_str());
    let argument = caps.get(2).map_or("", |m| m.as_str()).trim();

    let Some(scope) = scope_for_configuration(configuration) else {
        state.warn(line_no, format!("unknown configuration '{configuration}'"));
        return Ok(());
    };

    // BOM imports arrive wrapped: platform("g:a:v") / enforcedPlatform(...)
    let inner = argument
        .strip_prefix("platform(")
        .or_else(|| argument.strip_prefix("enforcedPlatform("))
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(argument)
        .trim();

    if let Some(quoted) = inner.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        let coordinate =
            parse_coordinate(quoted, scope).map_err(|e| e.into_malformed_at(origin, line_no))?;
        state
            .descriptor
            .dependencies
            .push(DependencyRequest::Direct(coordinate));
    } else if let Some(accessor) = inner.strip_prefix("libs.") {
        state.descriptor.dependencies.push(DependencyRequest::Alias {
            name: normalize_alias(accessor),
            scope,
        });
    } else {
        // project(":module") and friends are out of scope for a plan.
        state.warn(line_no, format!("unsupported dependency notation '{inner}'"));
    }
    Ok(())
}

fn parse_coordinate(text: &str, scope: Scope) -> crate::error::Result<Coordinate> {
    let parts: Vec<&str> = text.split(':').collect();
    let coordinate = match parts.as_slice() {
        [group, artifact] => Coordinate {
            group: (*group).to_string(),
            artifact: (*artifact).to_string(),
            version: None,
            scope,
        },
        [group, artifact, version] => Coordinate {
            group: (*group).to_string(),
            artifact: (*artifact).to_string(),
            version: Some((*version).to_string()),
            scope,
        },
        _ => {
            return Err(GradleError::InvalidCoordinates {
                coordinates: text.to_string(),
            });
        }
    };
    if coordinate.group.is_empty() || coordinate.artifact.is_empty() {
        return Err(GradleError::InvalidCoordinates {
            coordinates: text.to_string(),
        });
    }
    Ok(coordinate)
}

/// Preview must reach compiler, runtime, and test runner; partial wiring
/// still enables the flag but is worth flagging.
fn finish_preview_flags(state: &mut FragmentState) {
    let flags = [
        (state.preview_compile, "compile"),
        (state.preview_exec, "run"),
        (state.preview_test, "test"),
    ];
    if !flags.iter().any(|(set, _)| *set) {
        return;
    }
    state.descriptor.language.preview = Some(true);

    let missing: Vec<&str> = flags
        .iter()
        .filter(|(set, _)| !*set)
        .map(|(_, task)| *task)
        .collect();
    if !missing.is_empty() {
        let line = state.preview_line;
        state.warn(
            line,
            format!(
                "--enable-preview is not propagated to {} tasks",
                missing.join(", ")
            ),
        );
    }
}

/// Whether `line` assigns to exactly `key` (as opposed to a longer
/// identifier sharing the prefix).
fn is_assignment_to(line: &str, key: &str) -> bool {
    line.strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

/// Strips a `//` comment unless it sits inside a string literal.
fn strip_line_comment(line: &str) -> &str {
    let mut in_string = false;
    let bytes = line.as_bytes();
    for i in 0..bytes.len() {
        match bytes[i] {
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
    }
    line
}
