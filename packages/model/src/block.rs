use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Block node (content tree)
///
/// Serialized with a `type` discriminator:
/// `text`, `image`, `grid`, `button`, `vertical-space`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    /// Markdown text
    Text(TextBlock),

    /// External image
    Image(ImageBlock),

    /// Column container
    Grid(GridBlock),

    /// Link styled as a button
    Button(ButtonBlock),

    /// Fixed-height spacer
    VerticalSpace(VerticalSpaceBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: TextSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub width: ImageWidth,
    #[serde(default)]
    pub height: ImageHeight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBlock {
    pub id: String,
    /// Number of columns; only 1..=3 have a dedicated layout
    pub size: u32,
    #[serde(default)]
    pub children: Vec<Block>,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonBlock {
    pub id: String,
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalSpaceBlock {
    pub id: String,
    /// Discrete height scale, 1..=5
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
}

/// Horizontal alignment of a button within its row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Small,
    Medium,
    Large,
}

/// Image width: intrinsic, container-wide, or a pixel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageWidth {
    #[default]
    Auto,
    Full,
    Pixels(u32),
}

/// Image height: fixed fallback or a pixel count (no `full`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageHeight {
    #[default]
    Auto,
    Pixels(u32),
}

/// Raw wire form shared by both image dimensions.
/// `null` shows up when a client serialized a failed number parse.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Pixels(u32),
    Keyword(String),
}

impl Serialize for ImageWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ImageWidth::Auto => serializer.serialize_str("auto"),
            ImageWidth::Full => serializer.serialize_str("full"),
            ImageWidth::Pixels(px) => serializer.serialize_u32(*px),
        }
    }
}

impl<'de> Deserialize<'de> for ImageWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<RawDimension>::deserialize(deserializer)? {
            None => Ok(ImageWidth::Auto),
            Some(RawDimension::Pixels(px)) => Ok(ImageWidth::Pixels(px)),
            Some(RawDimension::Keyword(word)) => match word.as_str() {
                "auto" => Ok(ImageWidth::Auto),
                "full" => Ok(ImageWidth::Full),
                other => Err(D::Error::custom(format!("invalid image width `{}`", other))),
            },
        }
    }
}

impl Serialize for ImageHeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ImageHeight::Auto => serializer.serialize_str("auto"),
            ImageHeight::Pixels(px) => serializer.serialize_u32(*px),
        }
    }
}

impl<'de> Deserialize<'de> for ImageHeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<RawDimension>::deserialize(deserializer)? {
            None => Ok(ImageHeight::Auto),
            Some(RawDimension::Pixels(px)) => Ok(ImageHeight::Pixels(px)),
            Some(RawDimension::Keyword(word)) if word == "auto" => Ok(ImageHeight::Auto),
            Some(RawDimension::Keyword(word)) => {
                Err(D::Error::custom(format!("invalid image height `{}`", word)))
            }
        }
    }
}

/// Variant tag without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Text,
    Image,
    Grid,
    Button,
    VerticalSpace,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Grid,
        BlockKind::Button,
        BlockKind::VerticalSpace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Grid => "grid",
            BlockKind::Button => "button",
            BlockKind::VerticalSpace => "vertical-space",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Block {
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Block::Text(TextBlock {
            id: id.into(),
            content: content.into(),
            color: String::new(),
            size: TextSize::default(),
            column_span: None,
        })
    }

    pub fn image(id: impl Into<String>, url: impl Into<String>, alt: impl Into<String>) -> Self {
        Block::Image(ImageBlock {
            id: id.into(),
            url: url.into(),
            alt: alt.into(),
            width: ImageWidth::Auto,
            height: ImageHeight::Auto,
            color: None,
            column_span: None,
        })
    }

    pub fn grid(id: impl Into<String>, size: u32, children: Vec<Block>) -> Self {
        Block::Grid(GridBlock {
            id: id.into(),
            size,
            children,
            color: String::new(),
            column_span: None,
        })
    }

    pub fn button(id: impl Into<String>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Block::Button(ButtonBlock {
            id: id.into(),
            text: text.into(),
            url: url.into(),
            align: Align::Left,
            color: String::new(),
            column_span: None,
        })
    }

    pub fn vertical_space(id: impl Into<String>, size: u32) -> Self {
        Block::VerticalSpace(VerticalSpaceBlock {
            id: id.into(),
            size,
            column_span: None,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Block::Text(b) => &b.id,
            Block::Image(b) => &b.id,
            Block::Grid(b) => &b.id,
            Block::Button(b) => &b.id,
            Block::VerticalSpace(b) => &b.id,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text(_) => BlockKind::Text,
            Block::Image(_) => BlockKind::Image,
            Block::Grid(_) => BlockKind::Grid,
            Block::Button(_) => BlockKind::Button,
            Block::VerticalSpace(_) => BlockKind::VerticalSpace,
        }
    }

    pub fn column_span(&self) -> Option<u32> {
        match self {
            Block::Text(b) => b.column_span,
            Block::Image(b) => b.column_span,
            Block::Grid(b) => b.column_span,
            Block::Button(b) => b.column_span,
            Block::VerticalSpace(b) => b.column_span,
        }
    }

    pub fn set_column_span(&mut self, span: Option<u32>) {
        let slot = match self {
            Block::Text(b) => &mut b.column_span,
            Block::Image(b) => &mut b.column_span,
            Block::Grid(b) => &mut b.column_span,
            Block::Button(b) => &mut b.column_span,
            Block::VerticalSpace(b) => &mut b.column_span,
        };
        *slot = span;
    }

    pub fn with_column_span(mut self, span: u32) -> Self {
        self.set_column_span(Some(span));
        self
    }

    pub fn as_grid(&self) -> Option<&GridBlock> {
        match self {
            Block::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Children of a container block
    pub fn children(&self) -> Option<&[Block]> {
        match self {
            Block::Grid(grid) => Some(&grid.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            Block::Grid(grid) => Some(&mut grid.children),
            _ => None,
        }
    }
}

impl GridBlock {
    /// Same grid with a different child list
    pub fn with_children(&self, children: Vec<Block>) -> GridBlock {
        GridBlock {
            id: self.id.clone(),
            size: self.size,
            children,
            color: self.color.clone(),
            column_span: self.column_span,
        }
    }
}
