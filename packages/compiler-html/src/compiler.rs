use folio_model::layout::{
    column_span_class, grid_class, grid_columns, spacer_class, spacer_height, IMAGE_FALLBACK_HEIGHT,
};
use folio_model::{
    Block, ButtonBlock, GridBlock, ImageBlock, ImageHeight, ImageWidth, Settings, Snapshot,
    TextBlock, VerticalSpaceBlock,
};
use pulldown_cmark::{html, Event, Options, Parser};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Markdown transform failed: {0}")]
    Markdown(String),
}

/// Options for HTML compilation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Include inline styles
    pub inline_styles: bool,
    /// Emit utility class names (requires a matching stylesheet)
    pub use_classes: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            inline_styles: true,
            use_classes: false,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

/// Converts a text block's markdown source into markup.
///
/// The output is inserted as-is, so implementations are responsible for
/// escaping anything they do not mean to emit as HTML.
pub trait MarkdownTransform {
    fn transform(&self, source: &str) -> Result<String, CompileError>;
}

/// CommonMark with tables and strikethrough. Raw HTML in the source is
/// escaped rather than passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

impl MarkdownTransform for CommonMark {
    fn transform(&self, source: &str) -> Result<String, CompileError> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(source, options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

struct Context<'a> {
    options: CompileOptions,
    markdown: &'a dyn MarkdownTransform,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: CompileOptions, markdown: &'a dyn MarkdownTransform) -> Self {
        Self {
            options,
            markdown,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    /// Multi-line content written as-is, without indentation
    fn add_block(&mut self, text: &str) {
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Opening tag under construction. Classes and styles are only emitted when
/// the matching option is on.
struct Tag {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    classes: Vec<&'static str>,
    styles: Vec<(&'static str, String)>,
}

impl Tag {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
        }
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((property, value.into()));
        self
    }

    /// Add a color style unless the color is empty
    fn color(self, property: &'static str, color: &str) -> Self {
        let color = color.trim();
        if color.is_empty() {
            self
        } else {
            self.style(property, color)
        }
    }

    /// Column span for blocks placed directly in a grid
    fn span(self, block: &Block, in_grid: bool) -> Self {
        match block.column_span().filter(|_| in_grid) {
            Some(span) => {
                let tag = self.style("grid-column", format!("span {} / span {}", span, span));
                match column_span_class(span) {
                    Some(class) => tag.class(class),
                    None => tag,
                }
            }
            None => self,
        }
    }

    fn open(&self, options: &CompileOptions) -> String {
        let mut out = format!("<{}", self.name);

        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }

        if options.use_classes && !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&self.classes.join(" "))));
        }

        if options.inline_styles && !self.styles.is_empty() {
            let styles: Vec<String> = self
                .styles
                .iter()
                .map(|(property, value)| format!("{}: {};", property, value))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape_html(&styles.join(" "))));
        }

        if is_self_closing(self.name) {
            out.push_str(" />");
        } else {
            out.push('>');
        }
        out
    }

    fn close(&self) -> String {
        format!("</{}>", self.name)
    }
}

/// Compile a page snapshot to a standalone HTML document
pub fn compile_page(
    snapshot: &Snapshot,
    options: CompileOptions,
    markdown: &dyn MarkdownTransform,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options, markdown);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(&snapshot.settings, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();

    let main = Tag::new("main")
        .class("mx-auto")
        .class(snapshot.settings.size.class())
        .style("max-width", snapshot.settings.size.max_width())
        .style("margin", "0 auto");
    let open = main.open(&ctx.options);
    ctx.add_line(&open);
    ctx.indent();

    compile_list(&snapshot.blocks, false, &mut ctx)?;

    ctx.dedent();
    ctx.add_line(&main.close());

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    debug!(title = %snapshot.settings.title, blocks = snapshot.blocks.len(), "Compiled page");

    Ok(ctx.get_output())
}

/// Compile a block list to an HTML fragment
pub fn compile_blocks(
    blocks: &[Block],
    options: CompileOptions,
    markdown: &dyn MarkdownTransform,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options, markdown);
    compile_list(blocks, false, &mut ctx)?;
    Ok(ctx.get_output())
}

fn compile_head(settings: &Settings, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&settings.title)));

    if !settings.description.is_empty() {
        ctx.add_line(&format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_html(&settings.description)
        ));
    }

    if let Some(favicon) = &settings.favicon {
        ctx.add_line(&format!("<link rel=\"icon\" href=\"{}\">", escape_html(favicon)));
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_list(blocks: &[Block], in_grid: bool, ctx: &mut Context) -> Result<(), CompileError> {
    for block in blocks {
        compile_block(block, in_grid, ctx)?;
    }
    Ok(())
}

fn compile_block(block: &Block, in_grid: bool, ctx: &mut Context) -> Result<(), CompileError> {
    match block {
        Block::Text(text) => compile_text(block, text, in_grid, ctx),
        Block::Image(image) => {
            compile_image(block, image, in_grid, ctx);
            Ok(())
        }
        Block::Grid(grid) => compile_grid(block, grid, in_grid, ctx),
        Block::Button(button) => {
            compile_button(block, button, in_grid, ctx);
            Ok(())
        }
        Block::VerticalSpace(space) => {
            compile_spacer(block, space, in_grid, ctx);
            Ok(())
        }
    }
}

fn compile_text(
    block: &Block,
    text: &TextBlock,
    in_grid: bool,
    ctx: &mut Context,
) -> Result<(), CompileError> {
    let (font_size, font_weight) = text.size.font();
    let tag = Tag::new("div")
        .attr("id", &text.id)
        .class("prose")
        .class(text.size.class())
        .style("font-size", font_size)
        .style("font-weight", font_weight)
        .color("color", &text.color)
        .span(block, in_grid);

    let markup = ctx.markdown.transform(&text.content)?;

    let open = tag.open(&ctx.options);
    ctx.add_line(&open);
    ctx.indent();
    let markup = markup.trim_end();
    if markup.contains('\n') {
        ctx.add_block(markup);
    } else if !markup.is_empty() {
        ctx.add_line(markup);
    }
    ctx.dedent();
    ctx.add_line(&tag.close());
    Ok(())
}

fn compile_image(block: &Block, image: &ImageBlock, in_grid: bool, ctx: &mut Context) {
    let width = match image.width {
        ImageWidth::Auto => "auto".to_string(),
        ImageWidth::Full => "100%".to_string(),
        ImageWidth::Pixels(px) => format!("{}px", px),
    };
    let height = match image.height {
        ImageHeight::Auto => IMAGE_FALLBACK_HEIGHT.to_string(),
        ImageHeight::Pixels(px) => format!("{}px", px),
    };

    let tag = Tag::new("img")
        .attr("id", &image.id)
        .attr("src", &image.url)
        .attr("alt", &image.alt)
        .class("object-cover")
        .style("width", width)
        .style("height", height)
        .style("object-fit", "cover")
        .color("background-color", image.color.as_deref().unwrap_or_default())
        .span(block, in_grid);

    let open = tag.open(&ctx.options);
    ctx.add_line(&open);
}

fn compile_grid(
    block: &Block,
    grid: &GridBlock,
    in_grid: bool,
    ctx: &mut Context,
) -> Result<(), CompileError> {
    let columns = grid_columns(grid.size);
    let tag = Tag::new("div")
        .attr("id", &grid.id)
        .class("grid")
        .class("gap-4")
        .class(grid_class(grid.size))
        .style("display", "grid")
        .style("grid-template-columns", format!("repeat({}, minmax(0, 1fr))", columns))
        .style("gap", "1rem")
        .color("background-color", &grid.color)
        .span(block, in_grid);

    let open = tag.open(&ctx.options);
    ctx.add_line(&open);
    ctx.indent();
    compile_list(&grid.children, true, ctx)?;
    ctx.dedent();
    ctx.add_line(&tag.close());
    Ok(())
}

fn compile_button(block: &Block, button: &ButtonBlock, in_grid: bool, ctx: &mut Context) {
    let row = Tag::new("div")
        .attr("id", &button.id)
        .class("flex")
        .class(button.align.class())
        .style("display", "flex")
        .style("justify-content", button.align.justify_content())
        .span(block, in_grid);

    let link = Tag::new("a")
        .attr("href", &button.url)
        .class("button")
        .style("display", "inline-block")
        .style("padding", "0.5rem 1rem")
        .style("border-radius", "0.375rem")
        .color("background-color", &button.color);

    let row_open = row.open(&ctx.options);
    ctx.add_line(&row_open);
    ctx.indent();
    let link_open = link.open(&ctx.options);
    ctx.add_line(&format!("{}{}{}", link_open, escape_html(&button.text), link.close()));
    ctx.dedent();
    ctx.add_line(&row.close());
}

fn compile_spacer(block: &Block, space: &VerticalSpaceBlock, in_grid: bool, ctx: &mut Context) {
    let tag = Tag::new("div")
        .attr("id", &space.id)
        .attr("aria-hidden", "true")
        .class(spacer_class(space.size))
        .style("height", spacer_height(space.size))
        .span(block, in_grid);

    let open = tag.open(&ctx.options);
    ctx.add_line(&format!("{}{}", open, tag.close()));
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "meta" | "link")
}
