use crate::{
    compile_blocks, compile_page, CommonMark, CompileError, CompileOptions, MarkdownTransform,
};
use folio_model::{Block, ImageBlock, ImageHeight, ImageWidth, PageSize, Settings, Snapshot};

fn image(width: ImageWidth, height: ImageHeight) -> Block {
    Block::Image(ImageBlock {
        id: "img".to_string(),
        url: "https://example.com/photo.jpg".to_string(),
        alt: "Photo".to_string(),
        width,
        height,
        color: None,
        column_span: None,
    })
}

fn compile(blocks: &[Block]) -> String {
    compile_blocks(blocks, CompileOptions::default(), &CommonMark).expect("Failed to compile")
}

#[test]
fn test_compile_page_document() {
    let mut settings = Settings::new("My Page", "A landing page");
    settings.size = PageSize::Medium;
    settings.favicon = Some("favicon.ico".to_string());
    let snapshot = Snapshot::new(settings, vec![Block::text("t", "Hello")]);

    let html = compile_page(&snapshot, CompileOptions::default(), &CommonMark)
        .expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>My Page</title>"));
    assert!(html.contains("<meta name=\"description\" content=\"A landing page\">"));
    assert!(html.contains("<link rel=\"icon\" href=\"favicon.ico\">"));
    assert!(html.contains("max-width: 64rem;"));
    assert!(html.contains("<p>Hello</p>"));
}

#[test]
fn test_empty_description_and_favicon_omitted() {
    let snapshot = Snapshot::new_page("Bare", "");
    let html = compile_page(&snapshot, CompileOptions::default(), &CommonMark)
        .expect("Failed to compile");

    assert!(!html.contains("name=\"description\""));
    assert!(!html.contains("rel=\"icon\""));
    assert!(html.contains("max-width: 48rem;"));
}

#[test]
fn test_image_width_full_and_auto() {
    let html = compile(&[image(ImageWidth::Full, ImageHeight::Pixels(300))]);
    assert!(html.contains("width: 100%;"));
    assert!(html.contains("height: 300px;"));

    let html = compile(&[image(ImageWidth::Auto, ImageHeight::Auto)]);
    assert!(html.contains("width: auto;"));
    assert!(html.contains("height: 12rem;"));

    let html = compile(&[image(ImageWidth::Pixels(640), ImageHeight::Auto)]);
    assert!(html.contains("width: 640px;"));
}

#[test]
fn test_image_attributes_escaped() {
    let block = Block::image("img", "https://example.com/a.jpg?x=1&y=2", "A \"quoted\" alt");
    let html = compile(&[block]);

    assert!(html.contains("src=\"https://example.com/a.jpg?x=1&amp;y=2\""));
    assert!(html.contains("alt=\"A &quot;quoted&quot; alt\""));
    assert!(html.contains("/>"));
}

#[test]
fn test_multiline_markup_not_reindented() {
    let html = compile(&[Block::text("t", "# Title\n\n```\ncode\n  indented\n```")]);

    assert!(html.contains("\n<h1>Title</h1>\n"));
    assert!(html.contains("<pre><code>code\n  indented\n</code></pre>\n"));
    assert!(!html.contains("  <h1>"));
}

#[test]
fn test_markdown_text() {
    let html = compile(&[Block::text("t", "# Title\n\nSome **bold** text")]);

    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<strong>bold</strong>"));
}

#[test]
fn test_raw_html_in_markdown_is_escaped() {
    let html = compile(&[Block::text("t", "Hello <script>alert(1)</script>")]);

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_grid_columns() {
    let grid = Block::grid("g", 3, vec![Block::text("a", "a"), Block::text("b", "b")]);
    let html = compile(&[grid]);
    assert!(html.contains("grid-template-columns: repeat(3, minmax(0, 1fr));"));

    // Unsupported size collapses to one column
    let grid = Block::grid("g", 7, vec![Block::text("a", "a")]);
    let html = compile(&[grid]);
    assert!(html.contains("grid-template-columns: repeat(1, minmax(0, 1fr));"));
}

#[test]
fn test_children_render_in_order() {
    let grid = Block::grid(
        "g",
        2,
        vec![Block::text("first", "first"), Block::text("second", "second")],
    );
    let html = compile(&[grid]);

    let first = html.find("id=\"first\"").expect("first child");
    let second = html.find("id=\"second\"").expect("second child");
    assert!(first < second);
}

#[test]
fn test_column_span_only_inside_grid() {
    let child = Block::text("c", "c").with_column_span(2);
    let html = compile(&[Block::grid("g", 3, vec![child.clone()])]);
    assert!(html.contains("grid-column: span 2 / span 2;"));

    let html = compile(&[child]);
    assert!(!html.contains("grid-column"));
}

#[test]
fn test_button_alignment_and_escaping() {
    let mut button = Block::button("btn", "Save & exit", "/done");
    if let Block::Button(inner) = &mut button {
        inner.align = folio_model::Align::Right;
        inner.color = "#3366FF".to_string();
    }
    let html = compile(&[button]);

    assert!(html.contains("justify-content: flex-end;"));
    assert!(html.contains("href=\"/done\""));
    assert!(html.contains("Save &amp; exit</a>"));
    assert!(html.contains("background-color: #3366FF;"));
}

#[test]
fn test_spacer_heights() {
    let html = compile(&[Block::vertical_space("s", 3)]);
    assert!(html.contains("height: 4rem;"));

    // Unknown size uses the smallest height
    let html = compile(&[Block::vertical_space("s", 9)]);
    assert!(html.contains("height: 1rem;"));
}

#[test]
fn test_classes_instead_of_styles() {
    let options = CompileOptions {
        inline_styles: false,
        use_classes: true,
        ..Default::default()
    };
    let blocks = vec![
        Block::grid("g", 2, vec![Block::vertical_space("s", 2)]),
        Block::text("t", "hi"),
    ];
    let html = compile_blocks(&blocks, options, &CommonMark).expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert!(html.contains("class=\"grid gap-4 md:grid-cols-2\""));
    assert!(html.contains("class=\"h-8\""));
    assert!(html.contains("class=\"prose text-base\""));
    assert!(!html.contains("style="));
}

#[test]
fn test_compile_without_pretty_print() {
    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };
    let html = compile_blocks(&[Block::text("t", "hi")], options, &CommonMark)
        .expect("Failed to compile");

    assert_eq!(
        html,
        "<div id=\"t\" style=\"font-size: 1rem; font-weight: 400;\"><p>hi</p></div>"
    );
}

struct Shout;

impl MarkdownTransform for Shout {
    fn transform(&self, source: &str) -> Result<String, CompileError> {
        Ok(source.to_uppercase())
    }
}

struct Broken;

impl MarkdownTransform for Broken {
    fn transform(&self, _source: &str) -> Result<String, CompileError> {
        Err(CompileError::Markdown("renderer offline".to_string()))
    }
}

#[test]
fn test_custom_markdown_transform() {
    let html = compile_blocks(&[Block::text("t", "quiet")], CompileOptions::default(), &Shout)
        .expect("Failed to compile");
    assert!(html.contains("QUIET"));

    let snapshot = Snapshot::new(Settings::default(), vec![Block::text("t", "x")]);
    let err = compile_page(&snapshot, CompileOptions::default(), &Broken).unwrap_err();
    assert!(matches!(err, CompileError::Markdown(_)));
}
