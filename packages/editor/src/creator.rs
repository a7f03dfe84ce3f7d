//! # Block Creation
//!
//! Turns raw form input into well-formed blocks.
//!
//! Every field arrives as the string the user typed. A form either yields a
//! complete block or a [`ValidationError`]; nothing half-built ever reaches
//! the tree.

use crate::tree_ops::insert_at;
use crate::{SpanPolicy, ValidationError};
use folio_model::{
    block_id, Align, Block, BlockKind, ButtonBlock, GridBlock, ImageBlock, ImageHeight, ImageWidth,
    TextBlock, TextSize, VerticalSpaceBlock,
};
use folio_model::layout::SPACER_SIZES;
use tracing::debug;

/// Content given to a text block created with an empty form
pub const DEFAULT_TEXT: &str = "Hello, world!";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextForm {
    pub content: String,
    pub color: String,
    /// `small` | `medium` | `large`; empty means small
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageForm {
    pub url: String,
    pub alt: String,
    /// Empty, `auto`, `full` or a pixel count
    pub width: String,
    /// Empty, `auto` or a pixel count
    pub height: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridForm {
    pub size: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonForm {
    pub text: String,
    pub url: String,
    /// `left` | `center` | `right`; empty means left
    pub align: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpacerForm {
    pub size: String,
}

/// Inputs for one block of the chosen kind
#[derive(Debug, Clone, PartialEq)]
pub enum BlockForm {
    Text(TextForm),
    Image(ImageForm),
    Grid(GridForm),
    Button(ButtonForm),
    VerticalSpace(SpacerForm),
}

/// Form applied to an existing block.
///
/// `column_span` is only meaningful for direct children of a grid; leave it
/// empty to keep the current span.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub form: BlockForm,
    pub column_span: String,
}

impl EditForm {
    pub fn new(form: BlockForm) -> Self {
        Self {
            form,
            column_span: String::new(),
        }
    }

    pub fn with_column_span(mut self, span: impl Into<String>) -> Self {
        self.column_span = span.into();
        self
    }
}

impl BlockForm {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockForm::Text(_) => BlockKind::Text,
            BlockForm::Image(_) => BlockKind::Image,
            BlockForm::Grid(_) => BlockKind::Grid,
            BlockForm::Button(_) => BlockKind::Button,
            BlockForm::VerticalSpace(_) => BlockKind::VerticalSpace,
        }
    }

    /// Build a new block with the given id.
    /// A new text block with no content starts as [`DEFAULT_TEXT`].
    pub fn build(&self, id: String) -> Result<Block, ValidationError> {
        let mut block = self.build_with_children(id, Vec::new())?;
        if let Block::Text(text) = &mut block {
            if text.content.is_empty() {
                text.content = DEFAULT_TEXT.to_string();
            }
        }
        Ok(block)
    }

    fn build_with_children(
        &self,
        id: String,
        children: Vec<Block>,
    ) -> Result<Block, ValidationError> {
        let block = match self {
            BlockForm::Text(form) => {
                Block::Text(TextBlock {
                    id,
                    content: form.content.clone(),
                    color: form.color.trim().to_string(),
                    size: parse_text_size(&form.size)?,
                    column_span: None,
                })
            }

            BlockForm::Image(form) => {
                let url = required("url", &form.url)?;
                let alt = required("alt", &form.alt)?;
                let color = form.color.trim();

                Block::Image(ImageBlock {
                    id,
                    url,
                    alt,
                    width: parse_width(&form.width)?,
                    height: parse_height(&form.height)?,
                    color: (!color.is_empty()).then(|| color.to_string()),
                    column_span: None,
                })
            }

            BlockForm::Grid(form) => Block::Grid(GridBlock {
                id,
                size: parse_positive("size", &form.size)?,
                children,
                color: form.color.trim().to_string(),
                column_span: None,
            }),

            BlockForm::Button(form) => Block::Button(ButtonBlock {
                id,
                text: required("text", &form.text)?,
                url: required("url", &form.url)?,
                align: parse_align(&form.align)?,
                color: form.color.trim().to_string(),
                column_span: None,
            }),

            BlockForm::VerticalSpace(form) => {
                let size = parse_positive("size", &form.size)?;
                let max = SPACER_SIZES.len() as u32;
                if size > max {
                    return Err(ValidationError::OutOfRange {
                        field: "size",
                        value: size,
                        min: 1,
                        max,
                    });
                }

                Block::VerticalSpace(VerticalSpaceBlock {
                    id,
                    size,
                    column_span: None,
                })
            }
        };

        Ok(block)
    }

    /// Prefill a form from an existing block
    pub fn from_block(block: &Block) -> Self {
        match block {
            Block::Text(text) => BlockForm::Text(TextForm {
                content: text.content.clone(),
                color: text.color.clone(),
                size: match text.size {
                    TextSize::Small => "small",
                    TextSize::Medium => "medium",
                    TextSize::Large => "large",
                }
                .to_string(),
            }),
            Block::Image(image) => BlockForm::Image(ImageForm {
                url: image.url.clone(),
                alt: image.alt.clone(),
                width: match image.width {
                    ImageWidth::Auto => "auto".to_string(),
                    ImageWidth::Full => "full".to_string(),
                    ImageWidth::Pixels(px) => px.to_string(),
                },
                height: match image.height {
                    ImageHeight::Auto => "auto".to_string(),
                    ImageHeight::Pixels(px) => px.to_string(),
                },
                color: image.color.clone().unwrap_or_default(),
            }),
            Block::Grid(grid) => BlockForm::Grid(GridForm {
                size: grid.size.to_string(),
                color: grid.color.clone(),
            }),
            Block::Button(button) => BlockForm::Button(ButtonForm {
                text: button.text.clone(),
                url: button.url.clone(),
                align: match button.align {
                    Align::Left => "left",
                    Align::Center => "center",
                    Align::Right => "right",
                }
                .to_string(),
                color: button.color.clone(),
            }),
            Block::VerticalSpace(space) => BlockForm::VerticalSpace(SpacerForm {
                size: space.size.to_string(),
            }),
        }
    }
}

/// Build a block from `form` and splice it in at `position`.
///
/// The id is derived from the block kind and position. On validation
/// failure the list is left as it was and the error is returned.
pub fn create_block(
    list: &[Block],
    position: usize,
    form: &BlockForm,
) -> Result<Vec<Block>, ValidationError> {
    let block = new_block(list, position, form)?;
    Ok(insert_at(list, position, block))
}

/// Build (without inserting) the block `create_block` would insert
pub fn new_block(
    list: &[Block],
    position: usize,
    form: &BlockForm,
) -> Result<Block, ValidationError> {
    let id = block_id(form.kind(), position, list);
    let block = form.build(id)?;
    debug!(kind = %form.kind(), id = %block.id(), position, "Created block");
    Ok(block)
}

/// Apply an edit form to an existing block.
///
/// The block keeps its id, and a grid keeps its children. `parent_size` is
/// the size of the enclosing grid, if any, and bounds the column span
/// through `policy`.
pub fn apply_edit(
    block: &Block,
    edit: &EditForm,
    parent_size: Option<u32>,
    policy: SpanPolicy,
) -> Result<Block, ValidationError> {
    if edit.form.kind() != block.kind() {
        return Err(ValidationError::KindMismatch {
            form: edit.form.kind(),
            block: block.kind(),
        });
    }

    let children = block.children().map(<[Block]>::to_vec).unwrap_or_default();
    let mut updated = edit.form.build_with_children(block.id().to_string(), children)?;

    let span = if edit.column_span.trim().is_empty() {
        block.column_span()
    } else {
        let requested = parse_positive("columnSpan", &edit.column_span)?;
        policy.resolve(requested, parent_size)?
    };
    updated.set_column_span(span);

    Ok(updated)
}

fn required(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

fn parse_positive(field: &'static str, input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::NotPositive {
            field,
            value: input.to_string(),
        }),
    }
}

fn parse_width(input: &str) -> Result<ImageWidth, ValidationError> {
    match input.trim() {
        "" | "auto" => Ok(ImageWidth::Auto),
        "full" => Ok(ImageWidth::Full),
        other => parse_positive("width", other).map(ImageWidth::Pixels),
    }
}

fn parse_height(input: &str) -> Result<ImageHeight, ValidationError> {
    match input.trim() {
        "" | "auto" => Ok(ImageHeight::Auto),
        other => parse_positive("height", other).map(ImageHeight::Pixels),
    }
}

fn parse_text_size(input: &str) -> Result<TextSize, ValidationError> {
    match input.trim() {
        "" | "small" => Ok(TextSize::Small),
        "medium" => Ok(TextSize::Medium),
        "large" => Ok(TextSize::Large),
        other => Err(ValidationError::InvalidChoice {
            field: "size",
            value: other.to_string(),
        }),
    }
}

fn parse_align(input: &str) -> Result<Align, ValidationError> {
    if input.trim().is_empty() {
        return Ok(Align::Left);
    }
    Align::parse(input).ok_or_else(|| ValidationError::InvalidChoice {
        field: "align",
        value: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_form(size: &str) -> BlockForm {
        BlockForm::Grid(GridForm {
            size: size.to_string(),
            color: String::new(),
        })
    }

    #[test]
    fn test_create_text_into_empty_list() {
        let out = create_block(&[], 0, &BlockForm::Text(TextForm::default())).unwrap();
        assert_eq!(out.len(), 1);
        match &out[0] {
            Block::Text(text) => {
                assert_eq!(text.id, "text-0");
                assert_eq!(text.content, DEFAULT_TEXT);
                assert_eq!(text.size, TextSize::Small);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_size_must_be_positive_integer() {
        let list = vec![Block::text("a", "a")];
        for bad in ["0", "", "two", "-1", "1.5"] {
            let result = create_block(&list, 1, &grid_form(bad));
            assert!(
                matches!(result, Err(ValidationError::NotPositive { field: "size", .. })),
                "size {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_grid_created_empty() {
        let out = create_block(&[], 0, &grid_form(" 2 ")).unwrap();
        let grid = out[0].as_grid().unwrap();
        assert_eq!(grid.id, "grid-0");
        assert_eq!(grid.size, 2);
        assert!(grid.children.is_empty());
    }

    #[test]
    fn test_image_requires_url_and_alt() {
        let missing_url = BlockForm::Image(ImageForm {
            alt: "a".into(),
            ..Default::default()
        });
        assert_eq!(
            create_block(&[], 0, &missing_url),
            Err(ValidationError::MissingField("url"))
        );

        let missing_alt = BlockForm::Image(ImageForm {
            url: "https://x/a.png".into(),
            alt: "   ".into(),
            ..Default::default()
        });
        assert_eq!(
            create_block(&[], 0, &missing_alt),
            Err(ValidationError::MissingField("alt"))
        );
    }

    #[test]
    fn test_image_dimensions() {
        let form = BlockForm::Image(ImageForm {
            url: "https://x/a.png".into(),
            alt: "a".into(),
            width: "full".into(),
            height: "320".into(),
            color: String::new(),
        });
        let Block::Image(image) = form.build("image-0".into()).unwrap() else {
            panic!("expected image");
        };
        assert_eq!(image.width, ImageWidth::Full);
        assert_eq!(image.height, ImageHeight::Pixels(320));
        assert_eq!(image.color, None);

        let bad_height = BlockForm::Image(ImageForm {
            url: "u".into(),
            alt: "a".into(),
            height: "full".into(),
            ..Default::default()
        });
        assert!(bad_height.build("image-0".into()).is_err());
    }

    #[test]
    fn test_button_alignment() {
        let form = BlockForm::Button(ButtonForm {
            text: "Contact".into(),
            url: "mailto:me@example.com".into(),
            align: "sideways".into(),
            color: String::new(),
        });
        assert!(matches!(
            form.build("button-0".into()),
            Err(ValidationError::InvalidChoice { field: "align", .. })
        ));
    }

    #[test]
    fn test_spacer_size_bounds() {
        let make = |size: &str| BlockForm::VerticalSpace(SpacerForm { size: size.into() });
        assert!(make("5").build("s".into()).is_ok());
        assert_eq!(
            make("6").build("s".into()),
            Err(ValidationError::OutOfRange {
                field: "size",
                value: 6,
                min: 1,
                max: 5
            })
        );
        assert!(make("0").build("s".into()).is_err());
    }

    #[test]
    fn test_rejected_creation_leaves_list_alone() {
        let list = vec![Block::text("a", "a")];
        let before = list.clone();
        assert!(create_block(&list, 0, &grid_form("0")).is_err());
        assert_eq!(list, before);
    }

    #[test]
    fn test_edit_keeps_id_and_children() {
        let grid = Block::grid("grid-3", 2, vec![Block::text("x", "x")]);
        let edited = apply_edit(
            &grid,
            &EditForm::new(grid_form("3")),
            None,
            SpanPolicy::Permissive,
        )
        .unwrap();

        let edited = edited.as_grid().unwrap();
        assert_eq!(edited.id, "grid-3");
        assert_eq!(edited.size, 3);
        assert_eq!(edited.children.len(), 1);
    }

    #[test]
    fn test_edit_span_through_policy() {
        let button = Block::button("button-0", "Go", "/go");
        let form = EditForm::new(BlockForm::from_block(&button)).with_column_span("3");

        let permissive = apply_edit(&button, &form, Some(2), SpanPolicy::Permissive).unwrap();
        assert_eq!(permissive.column_span(), Some(3));

        let clamped = apply_edit(&button, &form, Some(2), SpanPolicy::Clamp).unwrap();
        assert_eq!(clamped.column_span(), Some(2));

        assert_eq!(
            apply_edit(&button, &form, Some(2), SpanPolicy::Reject),
            Err(ValidationError::ColumnSpanOutOfRange { span: 3, max: 2 })
        );
    }

    #[test]
    fn test_edit_without_span_keeps_existing() {
        let text = Block::text("text-0", "a").with_column_span(2);
        let edited = apply_edit(
            &text,
            &EditForm::new(BlockForm::from_block(&text)),
            Some(3),
            SpanPolicy::Reject,
        )
        .unwrap();
        assert_eq!(edited, text);
    }

    #[test]
    fn test_edit_may_clear_text() {
        let text = Block::text("text-0", "something");
        let edited = apply_edit(
            &text,
            &EditForm::new(BlockForm::Text(TextForm::default())),
            None,
            SpanPolicy::Permissive,
        )
        .unwrap();
        let Block::Text(edited) = edited else {
            panic!("expected text");
        };
        assert_eq!(edited.content, "");
    }

    #[test]
    fn test_edit_kind_mismatch() {
        let text = Block::text("text-0", "a");
        assert_eq!(
            apply_edit(&text, &EditForm::new(grid_form("2")), None, SpanPolicy::Permissive),
            Err(ValidationError::KindMismatch {
                form: BlockKind::Grid,
                block: BlockKind::Text
            })
        );
    }
}
