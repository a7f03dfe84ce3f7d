//! Snapshot decoding against stored page content

use folio_model::visitor::{count_blocks, find_span_violations};
use folio_model::{Align, Block, ImageHeight, ImageWidth, PageSize, Snapshot, TextSize};

const STORED_PAGE: &str = r##"{
  "settings": { "title": "Jane Doe", "description": "Photographer", "size": "medium" },
  "blocks": [
    { "type": "text", "content": "# Hi", "size": "large", "id": "text-0" },
    { "type": "image", "url": "https://cdn.example.com/a.jpg", "alt": "A", "id": "image-1" },
    { "type": "grid", "size": 3, "id": "grid-2", "children": [
        { "type": "button", "text": "Contact", "url": "mailto:jane@example.com", "align": "center", "id": "button-0", "columnSpan": 2 },
        { "type": "image", "url": "https://cdn.example.com/b.jpg", "alt": "B", "id": "image-1", "width": 320, "height": "auto" }
    ]},
    { "type": "vertical-space", "size": 4, "id": "vertical-space-3" }
  ]
}"##;

#[test]
fn test_decode_stored_page() -> anyhow::Result<()> {
    let snapshot = Snapshot::from_json(STORED_PAGE)?;

    assert_eq!(snapshot.settings.size, PageSize::Medium);
    assert_eq!(snapshot.blocks.len(), 4);
    assert_eq!(count_blocks(&snapshot.blocks), 6);

    match &snapshot.blocks[0] {
        Block::Text(text) => {
            assert_eq!(text.size, TextSize::Large);
            assert_eq!(text.color, "");
        }
        other => panic!("expected text, got {:?}", other),
    }

    let grid = snapshot.blocks[2].as_grid().expect("grid");
    match &grid.children[0] {
        Block::Button(button) => {
            assert_eq!(button.align, Align::Center);
            assert_eq!(button.column_span, Some(2));
        }
        other => panic!("expected button, got {:?}", other),
    }
    match &grid.children[1] {
        Block::Image(image) => {
            assert_eq!(image.width, ImageWidth::Pixels(320));
            assert_eq!(image.height, ImageHeight::Auto);
        }
        other => panic!("expected image, got {:?}", other),
    }

    assert!(find_span_violations(&snapshot.blocks).is_empty());
    Ok(())
}

#[test]
fn test_encoded_snapshot_decodes_to_same_tree() -> anyhow::Result<()> {
    let snapshot = Snapshot::from_json(STORED_PAGE)?;
    let encoded = snapshot.to_json_pretty()?;

    assert!(encoded.contains("\"vertical-space\""));
    assert!(encoded.contains("\"columnSpan\": 2"));
    assert_eq!(Snapshot::from_json(&encoded)?, snapshot);
    Ok(())
}
