use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One independently sized and aligned piece of a status row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BlockRepr")]
pub struct TemplateBlock {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    pub shorten: bool,
}

impl TemplateBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            width: None,
            align: None,
            shorten: false,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn shorten(mut self) -> Self {
        self.shorten = true;
        self
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct BlockFields {
    content: String,
    width: Option<usize>,
    align: Option<Align>,
    shorten: bool,
}

/// A block may be written as a bare string.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockRepr {
    Content(String),
    Full(BlockFields),
}

impl From<BlockRepr> for TemplateBlock {
    fn from(repr: BlockRepr) -> Self {
        match repr {
            BlockRepr::Content(content) => TemplateBlock::new(content),
            BlockRepr::Full(fields) => Self {
                content: fields.content,
                width: fields.width,
                align: fields.align,
                shorten: fields.shorten,
            },
        }
    }
}

/// A status line: zero blocks is a blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RowRepr", into = "Vec<TemplateBlock>")]
pub struct Row(Vec<TemplateBlock>);

impl Row {
    pub fn new(blocks: Vec<TemplateBlock>) -> Self {
        Self(blocks)
    }

    pub fn blocks(&self) -> &[TemplateBlock] {
        &self.0
    }
}

impl From<TemplateBlock> for Row {
    fn from(block: TemplateBlock) -> Self {
        Self(vec![block])
    }
}

impl From<Row> for Vec<TemplateBlock> {
    fn from(row: Row) -> Self {
        row.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowRepr {
    Blocks(Vec<TemplateBlock>),
    Single(TemplateBlock),
}

impl From<RowRepr> for Row {
    fn from(repr: RowRepr) -> Self {
        match repr {
            RowRepr::Blocks(blocks) => Row(blocks),
            RowRepr::Single(block) => Row(vec![block]),
        }
    }
}

pub(super) fn default_template() -> Vec<Row> {
    vec![
        TemplateBlock::new("{title}")
            .align(Align::Center)
            .shorten()
            .into(),
        TemplateBlock::new("{artists}")
            .align(Align::Center)
            .shorten()
            .into(),
        TemplateBlock::new("{album}")
            .align(Align::Center)
            .shorten()
            .into(),
        Row::new(Vec::new()),
        Row::new(vec![
            TemplateBlock::new("{playback} {shuffle}").align(Align::Left),
            TemplateBlock::new("{time} / {duration}").align(Align::Center),
            TemplateBlock::new("{volume.symbol} {volume}%").align(Align::Right),
        ]),
        TemplateBlock::new("{progressbar}").align(Align::Center).into(),
    ]
}
