//! # Blocks
//!
//! A block is one independently stylable unit of a customizable page.
//! On the wire it is a flat JSON object discriminated by `type`:
//!
//! ```json
//! {
//!   "type": "tip",
//!   "name": "tip-card-1",
//!   "template": "<div>{{ visitor_name }}</div>",
//!   "data": { "primary_color": "#FACC15" },
//!   "style": { "top": "10px" },
//!   "className": "absolute"
//! }
//! ```
//!
//! Compound blocks (`razorpay`, `user_form`, `tips`) additionally carry
//! nested sub-blocks (`button`, `input`, `tip_btn` + `tip_card`), each with
//! their own template, data, style and class name.

use crate::data::{BlockData, DataMap, LeaderboardData, QrCodeData, SocialsData, TipData};
use crate::presets::{self, Preset};
use crate::{SchemaError, StyleMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Discriminant of a block, serialized as the JSON `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Tip,
    QrCode,
    Leaderboard,
    Socials,
    Razorpay,
    UserForm,
    Tips,
    Generic,
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Tip,
        BlockType::QrCode,
        BlockType::Leaderboard,
        BlockType::Socials,
        BlockType::Razorpay,
        BlockType::UserForm,
        BlockType::Tips,
        BlockType::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Tip => "tip",
            BlockType::QrCode => "qr_code",
            BlockType::Leaderboard => "leaderboard",
            BlockType::Socials => "socials",
            BlockType::Razorpay => "razorpay",
            BlockType::UserForm => "user_form",
            BlockType::Tips => "tips",
            BlockType::Generic => "generic",
        }
    }

    /// Fields of the fixed supporter form rendered by `user_form` blocks
    pub fn user_form_fields() -> &'static [UserFormField] {
        &USER_FORM_FIELDS
    }

    /// Addressable parts of this block type, root first
    pub fn parts(&self) -> &'static [BlockPart] {
        match self {
            BlockType::Razorpay => &[BlockPart::Root, BlockPart::Button],
            BlockType::UserForm => &[BlockPart::Root, BlockPart::Input],
            BlockType::Tips => &[BlockPart::Root, BlockPart::TipButton, BlockPart::TipCard],
            _ => &[BlockPart::Root],
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownBlockType(s.to_string()))
    }
}

/// Addresses the root of a block or one of its nested sub-blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockPart {
    Root,
    Button,
    Input,
    #[serde(rename = "tip_btn")]
    TipButton,
    TipCard,
}

impl BlockPart {
    /// JSON key of the sub-block (and the render-context key of its HTML)
    pub fn key(&self) -> &'static str {
        match self {
            BlockPart::Root => "root",
            BlockPart::Button => "button",
            BlockPart::Input => "input",
            BlockPart::TipButton => "tip_btn",
            BlockPart::TipCard => "tip_card",
        }
    }
}

impl fmt::Display for BlockPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Root fields shared by every block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "D: Serialize", deserialize = "D: BlockData"))]
pub struct TemplateBlock<D> {
    /// Preset identifier the creator picked (e.g. `tip-card-1`)
    #[serde(default)]
    pub name: String,

    /// Liquid template producing the block's inner HTML
    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub data: D,

    #[serde(default)]
    pub style: StyleMap,

    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Keys this schema does not model (backend ids, timestamps, ...)
    #[serde(flatten)]
    pub extra: DataMap,
}

/// Nested, independently styleable part of a compound block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubBlock {
    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub data: DataMap,

    #[serde(default)]
    pub style: StyleMap,

    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(flatten)]
    pub extra: DataMap,
}

/// Checkout block; the checkout widget itself is third-party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RazorpayBlock {
    #[serde(flatten)]
    pub root: TemplateBlock<DataMap>,

    #[serde(default)]
    pub button: SubBlock,
}

/// Supporter details form.
///
/// Only rendering and shared input styling exist; per-field editing is
/// still a "coming soon" feature of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFormBlock {
    #[serde(flatten)]
    pub root: TemplateBlock<DataMap>,

    /// Style and class shared by every form field
    #[serde(default)]
    pub input: SubBlock,
}

/// Composite tip card + tip button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipsBlock {
    #[serde(flatten)]
    pub root: TemplateBlock<DataMap>,

    #[serde(default)]
    pub tip_btn: SubBlock,

    #[serde(default)]
    pub tip_card: SubBlock,
}

/// A field of the fixed supporter form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserFormField {
    pub name: &'static str,
    pub label: &'static str,
    /// `input` type, or `textarea`
    pub kind: &'static str,
}

const USER_FORM_FIELDS: [UserFormField; 5] = [
    UserFormField { name: "name", label: "Name", kind: "text" },
    UserFormField { name: "email", label: "Email", kind: "email" },
    UserFormField { name: "phone", label: "Phone", kind: "tel" },
    UserFormField { name: "amount", label: "Amount", kind: "number" },
    UserFormField { name: "message", label: "Message", kind: "textarea" },
];

/// A typed block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Tip(TemplateBlock<TipData>),
    QrCode(TemplateBlock<QrCodeData>),
    Leaderboard(TemplateBlock<LeaderboardData>),
    Socials(TemplateBlock<SocialsData>),
    Razorpay(RazorpayBlock),
    UserForm(UserFormBlock),
    Tips(TipsBlock),
    Generic(TemplateBlock<DataMap>),
}

/// Run `$body` with `$root` bound to the block's root fields
macro_rules! with_root {
    ($block:expr, $root:ident => $body:expr) => {
        match $block {
            Block::Tip($root) => $body,
            Block::QrCode($root) => $body,
            Block::Leaderboard($root) => $body,
            Block::Socials($root) => $body,
            Block::Generic($root) => $body,
            Block::Razorpay(RazorpayBlock { root: $root, .. }) => $body,
            Block::UserForm(UserFormBlock { root: $root, .. }) => $body,
            Block::Tips(TipsBlock { root: $root, .. }) => $body,
        }
    };
}

impl Block {
    /// Canonical default block of a type (first preset, default data)
    pub fn new_default(block_type: BlockType) -> Self {
        Self::from_preset(block_type, presets::default_for(block_type))
    }

    /// Build a fresh block of `block_type` from a preset
    pub fn from_preset(block_type: BlockType, preset: &Preset) -> Self {
        match block_type {
            BlockType::Tip => Block::Tip(root_from_preset(preset)),
            BlockType::QrCode => Block::QrCode(root_from_preset(preset)),
            BlockType::Leaderboard => Block::Leaderboard(root_from_preset(preset)),
            BlockType::Socials => Block::Socials(root_from_preset(preset)),
            BlockType::Generic => Block::Generic(root_from_preset(preset)),
            BlockType::Razorpay => Block::Razorpay(RazorpayBlock {
                root: root_from_preset(preset),
                button: part_from_preset(preset, BlockPart::Button),
            }),
            BlockType::UserForm => Block::UserForm(UserFormBlock {
                root: root_from_preset(preset),
                input: part_from_preset(preset, BlockPart::Input),
            }),
            BlockType::Tips => Block::Tips(TipsBlock {
                root: root_from_preset(preset),
                tip_btn: part_from_preset(preset, BlockPart::TipButton),
                tip_card: part_from_preset(preset, BlockPart::TipCard),
            }),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Tip(_) => BlockType::Tip,
            Block::QrCode(_) => BlockType::QrCode,
            Block::Leaderboard(_) => BlockType::Leaderboard,
            Block::Socials(_) => BlockType::Socials,
            Block::Razorpay(_) => BlockType::Razorpay,
            Block::UserForm(_) => BlockType::UserForm,
            Block::Tips(_) => BlockType::Tips,
            Block::Generic(_) => BlockType::Generic,
        }
    }

    pub fn name(&self) -> &str {
        with_root!(self, root => root.name.as_str())
    }

    pub fn template(&self) -> &str {
        with_root!(self, root => root.template.as_str())
    }

    pub fn style(&self) -> &StyleMap {
        with_root!(self, root => &root.style)
    }

    pub fn class_name(&self) -> Option<&str> {
        with_root!(self, root => root.class_name.as_deref())
    }

    /// Root `data` as a JSON object (always an object, possibly empty)
    pub fn data_value(&self) -> Value {
        match with_root!(self, root => serde_json::to_value(&root.data)) {
            Ok(value @ Value::Object(_)) => value,
            _ => Value::Object(DataMap::new()),
        }
    }

    /// Nested sub-block, if this block type has that part.
    ///
    /// `Root` is not a sub-block; use the root accessors for it.
    pub fn part(&self, part: BlockPart) -> Option<&SubBlock> {
        match (self, part) {
            (Block::Razorpay(b), BlockPart::Button) => Some(&b.button),
            (Block::UserForm(b), BlockPart::Input) => Some(&b.input),
            (Block::Tips(b), BlockPart::TipButton) => Some(&b.tip_btn),
            (Block::Tips(b), BlockPart::TipCard) => Some(&b.tip_card),
            _ => None,
        }
    }

    pub fn part_mut(&mut self, part: BlockPart) -> Option<&mut SubBlock> {
        match (self, part) {
            (Block::Razorpay(b), BlockPart::Button) => Some(&mut b.button),
            (Block::UserForm(b), BlockPart::Input) => Some(&mut b.input),
            (Block::Tips(b), BlockPart::TipButton) => Some(&mut b.tip_btn),
            (Block::Tips(b), BlockPart::TipCard) => Some(&mut b.tip_card),
            _ => None,
        }
    }

    /// Switch to another preset of the same type, keeping data and style
    pub fn with_preset(&self, name: &str) -> Result<Block, SchemaError> {
        let block_type = self.block_type();
        let preset = presets::find(block_type, name).ok_or_else(|| SchemaError::UnknownPreset {
            block_type,
            name: name.to_string(),
        })?;

        let mut block = self.clone();
        with_root!(&mut block, root => {
            root.name = preset.name.to_string();
            root.template = preset.template.to_string();
        });
        for part_preset in preset.parts {
            if let Some(sub) = block.part_mut(part_preset.part) {
                sub.template = part_preset.template.to_string();
            }
        }
        Ok(block)
    }

    /// Set one `data` key; root data is re-validated against its typed shape
    pub fn with_data_field(&self, part: BlockPart, key: &str, value: Value) -> Result<Block, SchemaError> {
        let mut block = self.clone();
        if part == BlockPart::Root {
            with_root!(&mut block, root => set_data_key(&mut root.data, key, value))?;
            return Ok(block);
        }

        let block_type = block.block_type();
        let sub = block
            .part_mut(part)
            .ok_or(SchemaError::UnknownPart { block_type, part })?;
        sub.data.insert(key.to_string(), value);
        Ok(block)
    }

    pub fn with_style(&self, part: BlockPart, property: &str, value: &str) -> Result<Block, SchemaError> {
        self.edit_part(part, |_, style, _| {
            style.insert(property, value);
        })
    }

    pub fn without_style(&self, part: BlockPart, property: &str) -> Result<Block, SchemaError> {
        self.edit_part(part, |_, style, _| {
            style.remove(property);
        })
    }

    pub fn with_class_name(&self, part: BlockPart, class_name: Option<String>) -> Result<Block, SchemaError> {
        self.edit_part(part, |_, _, class| *class = class_name)
    }

    pub fn with_template(&self, part: BlockPart, template: &str) -> Result<Block, SchemaError> {
        self.edit_part(part, |current, _, _| *current = template.to_string())
    }

    fn edit_part(
        &self,
        part: BlockPart,
        edit: impl FnOnce(&mut String, &mut StyleMap, &mut Option<String>),
    ) -> Result<Block, SchemaError> {
        let mut block = self.clone();
        if part == BlockPart::Root {
            with_root!(&mut block, root => edit(&mut root.template, &mut root.style, &mut root.class_name));
            return Ok(block);
        }

        let block_type = block.block_type();
        let sub = block
            .part_mut(part)
            .ok_or(SchemaError::UnknownPart { block_type, part })?;
        edit(&mut sub.template, &mut sub.style, &mut sub.class_name);
        Ok(block)
    }
}

fn root_from_preset<D: BlockData>(preset: &Preset) -> TemplateBlock<D> {
    TemplateBlock {
        name: preset.name.to_string(),
        template: preset.template.to_string(),
        data: D::default(),
        style: StyleMap::new(),
        class_name: None,
        extra: DataMap::new(),
    }
}

fn part_from_preset(preset: &Preset, part: BlockPart) -> SubBlock {
    SubBlock {
        template: preset
            .part(part)
            .map(|p| p.template.to_string())
            .unwrap_or_default(),
        data: presets::part_data_defaults(part),
        style: StyleMap::new(),
        class_name: None,
        extra: DataMap::new(),
    }
}

fn set_data_key<D: BlockData>(data: &mut D, key: &str, value: Value) -> Result<(), SchemaError> {
    let mut object = match serde_json::to_value(&*data) {
        Ok(Value::Object(object)) => object,
        _ => DataMap::new(),
    };
    object.insert(key.to_string(), value);

    *data = serde_json::from_value(Value::Object(object)).map_err(|e| SchemaError::InvalidData {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
