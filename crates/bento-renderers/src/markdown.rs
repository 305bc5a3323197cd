//! Markdown rendering with a sanitization gate.

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde_json::Value;

use bento_mime::{Artifact, MimeRenderer, RenderContext, RenderError, Safety, UrlResolver};

use crate::sanitize::sanitize_html;
use crate::util::{escape_html, slugify};

/// Renders `text/markdown` payloads to HTML.
///
/// GFM features (tables, strikethrough, task lists) are enabled. Relative
/// links and image sources are resolved through the document resolver when
/// one is set. Raw HTML embedded in the markdown passes through the walk
/// and is stripped by sanitization when the bundle is untrusted.
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl MimeRenderer for MarkdownRenderer {
    fn safety(&self) -> Safety {
        Safety::Sanitizable
    }

    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
        let source = value
            .as_str()
            .ok_or_else(|| RenderError::malformed(ctx.mimetype, "expected a string payload"))?;

        let html = HtmlWriter::new(ctx.resolver).render(source);
        let html = if ctx.trusted {
            html
        } else {
            sanitize_html(&html)
        };

        Ok(Artifact::markup(ctx.mimetype, html))
    }
}

/// Accumulating heading state: raw text feeds the anchor slug, HTML feeds
/// the element body.
struct Heading {
    level: u8,
    text: String,
    html: String,
}

/// Pending image: alt text arrives as events between start and end tags.
struct PendingImage {
    src: String,
    title: String,
    alt: String,
}

/// Event-driven HTML writer over a pulldown-cmark stream.
struct HtmlWriter<'r> {
    output: String,
    resolver: Option<&'r dyn UrlResolver>,
    code_lang: Option<String>,
    code_buf: Option<String>,
    heading: Option<Heading>,
    image: Option<PendingImage>,
    slugs: HashMap<String, usize>,
    in_table_head: bool,
}

impl<'r> HtmlWriter<'r> {
    fn new(resolver: Option<&'r dyn UrlResolver>) -> Self {
        Self {
            output: String::with_capacity(1024),
            resolver,
            code_lang: None,
            code_buf: None,
            heading: None,
            image: None,
            slugs: HashMap::new(),
            in_table_head: false,
        }
    }

    fn render(mut self, source: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        for event in Parser::new_ext(source, options) {
            self.event(event);
        }
        self.output
    }

    /// Push inline markup to the heading buffer when one is open, to the
    /// output otherwise.
    fn push_inline(&mut self, content: &str) {
        if let Some(heading) = &mut self.heading {
            heading.html.push_str(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn resolve(&self, reference: &str) -> String {
        match self.resolver {
            Some(resolver) => resolver.resolve(reference),
            None => reference.to_owned(),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let markup = format!("<code>{}</code>", escape_html(&code));
                // Inline code in a heading contributes to the slug text.
                if let Some(heading) = &mut self.heading {
                    heading.text.push_str(&code);
                    heading.html.push_str(&markup);
                } else {
                    self.output.push_str(&markup);
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => {
                if let Some(buf) = &mut self.code_buf {
                    buf.push('\n');
                } else {
                    self.output.push('\n');
                }
            }
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the slug is known.
                self.heading = Some(Heading {
                    level: level as u8,
                    text: String::new(),
                    html: String::new(),
                });
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                self.code_lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code_buf = Some(String::new());
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(_) => self.output.push_str("<table>"),
            Tag::TableHead => {
                self.in_table_head = true;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => self.output.push_str("<tr>"),
            Tag::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "<th>" } else { "<td>" });
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let href = self.resolve(&dest_url);
                self.push_inline(&format!(r#"<a href="{}">"#, escape_html(&href)));
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(PendingImage {
                    src: self.resolve(&dest_url),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.take() {
                    self.write_heading(&heading);
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let content = self.code_buf.take().unwrap_or_default();
                match self.code_lang.take() {
                    Some(lang) => {
                        let _ = write!(
                            self.output,
                            r#"<pre><code class="language-{}">{}</code></pre>"#,
                            escape_html(&lang),
                            escape_html(&content)
                        );
                    }
                    None => {
                        let _ = write!(
                            self.output,
                            "<pre><code>{}</code></pre>",
                            escape_html(&content)
                        );
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    self.write_image(&image);
                }
            }
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(buf) = &mut self.code_buf {
            buf.push_str(text);
        } else if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else if let Some(heading) = &mut self.heading {
            heading.text.push_str(text);
            heading.html.push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn write_heading(&mut self, heading: &Heading) {
        let level = heading.level;
        let body = heading.html.trim();
        let slug = slugify(&heading.text);
        if slug.is_empty() {
            let _ = write!(self.output, "<h{level}>{body}</h{level}>");
            return;
        }

        let seen = self.slugs.entry(slug.clone()).or_insert(0);
        let id = if *seen == 0 {
            slug.clone()
        } else {
            format!("{slug}-{seen}")
        };
        *seen += 1;

        let _ = write!(self.output, r#"<h{level} id="{id}">{body}</h{level}>"#);
    }

    fn write_image(&mut self, image: &PendingImage) {
        let title_attr = if image.title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(&image.title))
        };
        let _ = write!(
            self.output,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(&image.src),
            escape_html(&image.alt)
        );
    }
}
