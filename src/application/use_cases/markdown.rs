use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

const SCRIPT_FENCE_PREFIX: &str = "```javascript\n";
const SCRIPT_FENCE_SUFFIX: &str = "\n```";

/// A code fragment found by the Markdown structure pass. Inline spans carry
/// no copy affordance; fenced blocks expose their exact code text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSegment {
    Inline(String),
    Fenced { language: String, code: String },
}

impl CodeSegment {
    /// The text a copy action would place on the clipboard, fence markers
    /// already stripped. Inline spans are not copyable.
    pub fn copy_text(&self) -> Option<&str> {
        match self {
            CodeSegment::Inline(_) => None,
            CodeSegment::Fenced { code, .. } => Some(code),
        }
    }
}

/// Rendered generation output: HTML fragments for display plus the ordered
/// code segments extracted for copy/export actions. Ephemeral, replaced on
/// the next generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub html: String,
    pub segments: Vec<CodeSegment>,
}

/// Interprets generated text as Markdown (tables extension on) and renders
/// it into HTML, extracting inline and fenced code along the way.
pub fn render_markdown(content: &str) -> RenderedArtifact {
    let options = Options::ENABLE_TABLES;

    let mut segments = Vec::new();
    let mut code_language: Option<String> = None;
    let mut code_buffer = String::new();

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                code_language = Some(match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                });
                code_buffer.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(language) = code_language.take() {
                    // pulldown keeps the trailing newline of the last line
                    let code = code_buffer.strip_suffix('\n').unwrap_or(&code_buffer);
                    segments.push(CodeSegment::Fenced {
                        language,
                        code: code.to_string(),
                    });
                }
            }
            Event::Text(text) if code_language.is_some() => code_buffer.push_str(&text),
            Event::Code(text) => segments.push(CodeSegment::Inline(text.to_string())),
            _ => {}
        }
    }

    let mut html = String::new();
    html::push_html(&mut html, Parser::new_ext(content, options));

    RenderedArtifact { html, segments }
}

/// Wraps a raw Postman script as a single fenced block so it picks up code
/// styling when rendered.
pub fn wrap_script_block(script: &str) -> String {
    format!("{}{}{}", SCRIPT_FENCE_PREFIX, script, SCRIPT_FENCE_SUFFIX)
}

/// Recovers the raw script from a wrapped block by exact prefix/suffix
/// matching. Idempotent: unwrapped input passes through unchanged.
pub fn strip_script_block(content: &str) -> &str {
    content
        .strip_prefix(SCRIPT_FENCE_PREFIX)
        .and_then(|rest| rest.strip_suffix(SCRIPT_FENCE_SUFFIX))
        .unwrap_or(content)
}
