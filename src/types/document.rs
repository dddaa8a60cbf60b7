//! Design document types.
//!
//! These mirror the subset of the Figma node JSON the analysis rules read.
//! Every field is optional: a missing key, a `null`, or a value of the wrong
//! type deserializes to `None` (or an empty child list), and the rules skip
//! what they cannot evaluate. Keys the model does not name are ignored.

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::walker::Walk;

/// Node type tag for text layers.
pub const TEXT: &str = "TEXT";
/// Node type tag for rectangles.
pub const RECTANGLE: &str = "RECTANGLE";
/// Node type tag for frames.
pub const FRAME: &str = "FRAME";

/// One element of a design document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Figma type tag (e.g. "TEXT", "RECTANGLE", "FRAME")
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub node_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub style: Option<TypeStyle>,
    #[serde(default, deserialize_with = "lenient::entries", skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(default, deserialize_with = "lenient::children", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DesignNode>,
}

// Unlinks descendants onto a heap stack so deep trees drop without recursion.
impl Drop for DesignNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl DesignNode {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, tag: impl Into<String>) -> Self {
        self.node_type = Some(tag.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_box(mut self, bbox: BoundingBox) -> Self {
        self.absolute_bounding_box = Some(bbox);
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.style = Some(TypeStyle {
            font_size: Some(font_size),
            ..TypeStyle::default()
        });
        self
    }

    /// Appends a fill after any existing ones.
    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.get_or_insert_with(Vec::new).push(paint);
        self
    }

    pub fn with_children(mut self, children: Vec<DesignNode>) -> Self {
        self.children = children;
        self
    }

    /// Pre-order traversal of this node and all of its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    pub fn is_type(&self, tag: &str) -> bool {
        self.node_type.as_deref() == Some(tag)
    }

    pub fn is_text(&self) -> bool {
        self.is_type(TEXT)
    }

    pub fn name_lower(&self) -> String {
        self.name.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Width and height of the bounding box, when both are present.
    pub fn size(&self) -> Option<(f64, f64)> {
        self.absolute_bounding_box.as_ref().and_then(BoundingBox::size)
    }

    /// Declared font size, if the node carries one.
    pub fn font_size(&self) -> Option<f64> {
        self.style
            .as_ref()
            .and_then(|s| s.font_size)
            .filter(|fs| *fs != 0.0)
    }

    /// Color of the first fill, when it carries all three channels.
    /// Later fills are not considered.
    pub fn first_fill_color(&self) -> Option<Srgb<u8>> {
        self.fills
            .as_ref()
            .and_then(|fills| fills.first())
            .and_then(|paint| paint.color.as_ref())
            .and_then(PaintColor::to_srgb8)
    }
}

/// Absolute position and size of a node in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
        }
    }

    /// `(width, height)` when both dimensions are present and non-zero.
    pub fn size(&self) -> Option<(f64, f64)> {
        let width = self.width.filter(|w| *w != 0.0)?;
        let height = self.height.filter(|h| *h != 0.0)?;
        Some((width, height))
    }

    /// The box as a fully specified rectangle. A missing origin is taken as zero.
    pub fn rect(&self) -> Option<Rect> {
        let (width, height) = self.size()?;
        Some(Rect {
            x: self.x.unwrap_or(0.0),
            y: self.y.unwrap_or(0.0),
            width,
            height,
        })
    }
}

/// A fully specified axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Edge-to-edge separation: the larger of the horizontal and vertical gaps,
    /// each clamped at zero. Touching or overlapping boxes yield `0.0`.
    pub fn gap(&self, other: &Rect) -> f64 {
        let dx = (other.x - (self.x + self.width))
            .max(self.x - (other.x + other.width))
            .max(0.0);
        let dy = (other.y - (self.y + self.height))
            .max(self.y - (other.y + other.height))
            .max(0.0);
        dx.max(dy)
    }
}

/// Typography style from Figma.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub paint_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub color: Option<PaintColor>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Paint {
    pub fn solid(color: PaintColor) -> Self {
        Self {
            paint_type: Some("SOLID".to_string()),
            color: Some(color),
            opacity: None,
        }
    }
}

/// RGBA color from Figma (0.0-1.0 range).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintColor {
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl PaintColor {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: Some(r),
            g: Some(g),
            b: Some(b),
            a: None,
        }
    }

    /// 8-bit channels, or `None` unless r, g and b are all present.
    /// Components are truncated, not rounded (0.5 maps to 127).
    pub fn to_srgb8(&self) -> Option<Srgb<u8>> {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Some(Srgb::new(channel(self.r?), channel(self.g?), channel(self.b?)))
    }

    /// Convert to hex color string (e.g., "#ff7f00").
    pub fn to_hex(&self) -> Option<String> {
        let rgb = self.to_srgb8()?;
        Some(format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue))
    }
}

/// Field readers that turn a malformed value into "absent" instead of an error.
mod lenient {
    use std::fmt;

    use serde::de::{
        value::MapAccessDeserializer, DeserializeOwned, Deserializer, Error, IgnoredAny,
        MapAccess, SeqAccess, Visitor,
    };
    use serde::Deserialize;
    use serde_json::Value;

    use super::DesignNode;

    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(T::deserialize(value).ok())
    }

    /// A list whose malformed entries read as defaults, keeping positions intact.
    pub fn entries<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(Some(
                items
                    .into_iter()
                    .map(|item| T::deserialize(item).unwrap_or_default())
                    .collect(),
            )),
            _ => Ok(None),
        }
    }

    /// Streams child nodes without buffering the subtree. A non-list reads as
    /// no children and a non-object entry is skipped.
    pub fn children<'de, D>(deserializer: D) -> Result<Vec<DesignNode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ChildrenVisitor)
    }

    struct ChildrenVisitor;

    impl<'de> Visitor<'de> for ChildrenVisitor {
        type Value = Vec<DesignNode>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of nodes")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut children = Vec::new();
            while let Some(ChildSlot(node)) = seq.next_element()? {
                children.extend(node);
            }
            Ok(children)
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            drain_map(map)?;
            Ok(Vec::new())
        }

        fn visit_bool<E: Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_i64<E: Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_u64<E: Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_f64<E: Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_str<E: Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    /// One entry of a `children` list: a node when the entry is an object.
    struct ChildSlot(Option<DesignNode>);

    impl<'de> Deserialize<'de> for ChildSlot {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ChildSlotVisitor)
        }
    }

    struct ChildSlotVisitor;

    impl<'de> Visitor<'de> for ChildSlotVisitor {
        type Value = ChildSlot;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a node object")
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            DesignNode::deserialize(MapAccessDeserializer::new(map)).map(|node| ChildSlot(Some(node)))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(ChildSlot(None))
        }

        fn visit_bool<E: Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(ChildSlot(None))
        }

        fn visit_i64<E: Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(ChildSlot(None))
        }

        fn visit_u64<E: Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(ChildSlot(None))
        }

        fn visit_f64<E: Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(ChildSlot(None))
        }

        fn visit_str<E: Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(ChildSlot(None))
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(ChildSlot(None))
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(ChildSlot(None))
        }
    }

    fn drain_map<'de, A: MapAccess<'de>>(mut map: A) -> Result<(), A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figma_color_truncates_to_8_bit() {
        let rgb = PaintColor::new(0.5, 0.25, 0.0).to_srgb8().expect("complete color");
        assert_eq!((rgb.red, rgb.green, rgb.blue), (127, 63, 0));
    }

    #[test]
    fn figma_color_to_hex() {
        assert_eq!(PaintColor::new(1.0, 0.5, 0.0).to_hex().as_deref(), Some("#ff7f00"));
        assert_eq!(PaintColor::new(0.0, 0.0, 0.0).to_hex().as_deref(), Some("#000000"));
    }

    #[test]
    fn deserializes_sparse_figma_json() {
        let node: DesignNode = serde_json::from_value(serde_json::json!({
            "id": "1:2",
            "type": "FRAME",
            "name": "Card",
            "absoluteBoundingBox": {"x": 0, "y": 10, "width": 200, "height": 100},
            "blendMode": "PASS_THROUGH",
            "children": [
                {"type": "TEXT", "style": {"fontSize": 12, "fontWeight": 400}},
                {"fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}]}
            ]
        }))
        .expect("deserialize node");

        assert!(node.is_type(FRAME));
        assert_eq!(node.size(), Some((200.0, 100.0)));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].font_size(), Some(12.0));
        assert!(node.children[0].first_fill_color().is_none());
        assert_eq!(
            node.children[1].first_fill_color(),
            Some(Srgb::new(255u8, 255, 255))
        );
    }

    #[test]
    fn empty_object_is_a_leaf_with_nothing_set() {
        let node: DesignNode = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(node, DesignNode::default());
        assert!(node.size().is_none());
        assert!(node.font_size().is_none());
    }

    #[test]
    fn zero_dimensions_count_as_absent() {
        let bb = BoundingBox::new(0.0, 0.0, 0.0, 20.0);
        assert!(bb.size().is_none());
        assert!(bb.rect().is_none());
        let partial = BoundingBox {
            height: Some(40.0),
            ..BoundingBox::default()
        };
        assert!(partial.size().is_none());
    }

    #[test]
    fn rect_gap_uses_larger_axis_separation() {
        let a = Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
        let right = Rect { x: 25.0, y: 0.0, width: 10.0, height: 10.0 };
        let diagonal = Rect { x: 14.0, y: 30.0, width: 10.0, height: 10.0 };
        let overlapping = Rect { x: 5.0, y: 5.0, width: 10.0, height: 10.0 };

        assert_eq!(a.gap(&right), 15.0);
        assert_eq!(right.gap(&a), 15.0);
        assert_eq!(a.gap(&diagonal), 20.0);
        assert_eq!(a.gap(&overlapping), 0.0);
    }

    #[test]
    fn wrong_typed_field_only_blanks_that_field() {
        let node: DesignNode = serde_json::from_value(serde_json::json!({
            "children": [
                {"type": "TEXT", "style": {"fontSize": 10}},
                {"type": "TEXT", "style": {"fontSize": "12px", "fontWeight": 700}},
                {"type": 7, "name": ["x"], "absoluteBoundingBox": {"width": "wide", "height": 20}}
            ]
        }))
        .expect("lenient node");

        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[0].font_size(), Some(10.0));
        assert!(node.children[1].is_text());
        assert!(node.children[1].font_size().is_none());
        assert_eq!(
            node.children[1].style.as_ref().and_then(|s| s.font_weight),
            Some(700.0)
        );
        let odd = &node.children[2];
        assert!(odd.node_type.is_none());
        assert!(odd.name.is_none());
        assert_eq!(odd.absolute_bounding_box.and_then(|b| b.height), Some(20.0));
        assert!(odd.size().is_none());
    }

    #[test]
    fn malformed_children_read_as_no_children() {
        for children in [
            serde_json::json!(null),
            serde_json::json!("none"),
            serde_json::json!({"0": {"type": "TEXT"}}),
            serde_json::json!(3),
        ] {
            let node: DesignNode =
                serde_json::from_value(serde_json::json!({"type": "FRAME", "children": children}))
                    .expect("lenient children");
            assert!(node.is_type(FRAME));
            assert!(node.children.is_empty());
        }

        let mixed: DesignNode = serde_json::from_str(
            r#"{"children": [1, {"id": "kept"}, null, [{"id": "nested-list"}], "x"]}"#,
        )
        .expect("mixed children");
        assert_eq!(mixed.children.len(), 1);
        assert_eq!(mixed.children[0].id.as_deref(), Some("kept"));
    }

    #[test]
    fn malformed_fills_keep_their_positions() {
        let node: DesignNode = serde_json::from_value(serde_json::json!({
            "fills": ["gradient", {"color": {"r": 0, "g": 0, "b": 0}}]
        }))
        .expect("lenient fills");
        let fills = node.fills.as_ref().expect("fills list");
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0], Paint::default());
        // The first fill has no color, so the node has no first-fill color.
        assert!(node.first_fill_color().is_none());

        let not_a_list: DesignNode =
            serde_json::from_value(serde_json::json!({"fills": {"r": 1}})).expect("lenient");
        assert!(not_a_list.fills.is_none());
    }

    #[test]
    fn incomplete_colors_are_not_colors() {
        for color in [
            serde_json::json!({}),
            serde_json::json!({"r": 0, "g": 0}),
            serde_json::json!({"r": 0, "g": "0", "b": 0}),
            serde_json::json!(null),
        ] {
            let node: DesignNode = serde_json::from_value(serde_json::json!({
                "fills": [{"type": "SOLID", "color": color}]
            }))
            .expect("lenient color");
            assert!(node.first_fill_color().is_none(), "color should be absent");
        }
        assert!(PaintColor::default().to_srgb8().is_none());
    }

    #[test]
    fn builders_set_fields() {
        let node = DesignNode::default()
            .with_id("1:1")
            .with_type(TEXT)
            .with_name("Label")
            .with_box(BoundingBox::new(0.0, 0.0, 10.0, 20.0))
            .with_font_size(12.0)
            .with_fill(Paint::solid(PaintColor::new(0.0, 0.0, 0.0)))
            .with_children(vec![DesignNode::default()]);

        assert_eq!(node.id.as_deref(), Some("1:1"));
        assert!(node.is_text());
        assert_eq!(node.name_lower(), "label");
        assert_eq!(node.size(), Some((10.0, 20.0)));
        assert_eq!(node.font_size(), Some(12.0));
        assert_eq!(node.first_fill_color(), Some(Srgb::new(0u8, 0, 0)));
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn deep_tree_drops_without_recursion() {
        let mut node = DesignNode::default();
        for _ in 0..200_000 {
            node = DesignNode::default().with_children(vec![node]);
        }
        drop(node);
    }
}
