//! Observation rendering.
//!
//! Turns an actor's position into a flat list of [`Image`]s. Nothing the
//! actor sees is absolute: every record carries its signed offset from
//! the actor's cursor along one axis (items, lines or columns).

use textworld_api::{Image, Info, UnitId};

use crate::cursor::{ActorPos, Caret};
use crate::tree::{Character, Item, ItemKind, Line, Tree};

/// Info labels used by the text world.
pub mod labels {
    pub const ITEM_TYPE: &str = "[itemType]";
    pub const DIRECTORY: &str = "[directory]";
    pub const FILE: &str = "[file]";
    pub const ITEM_DIRECTION: &str = "[itemDirection]";
    pub const CONTENT_TYPE: &str = "[contentType]";
    pub const LINE: &str = "[line]";
    pub const LINE_DIRECTION: &str = "[lineDirection]";
    pub const CHAR_DIRECTION: &str = "[charDirection]";
}

/// Renders everything an actor at `pos` sees: file-local records first,
/// then directory-local records.
pub fn look(tree: &Tree, pos: &ActorPos) -> Vec<Image> {
    let Some(item) = tree.item(pos.item) else {
        return Vec::new();
    };

    let mut images = file_images(item, pos.caret);
    images.extend(directory_images(tree, item, pos.item_cursor as i64));
    images
}

impl Item {
    /// Renders this item seen from `delta` slots away.
    pub fn image(&self, delta: i64) -> Image {
        let kind = match self.kind() {
            ItemKind::Directory { .. } => labels::DIRECTORY,
            ItemKind::File { .. } => labels::FILE,
        };
        Image {
            id: self.id(),
            name: self.name().to_string(),
            permanent: vec![Info::kind(labels::ITEM_TYPE, kind)],
            transient: vec![Info::direction(labels::ITEM_DIRECTION, delta)],
        }
    }
}

/// Renders the parent marker and, for directories, every child.
///
/// The parent is tagged `offset`; the child in item-cursor slot `s` is
/// tagged `offset - s`.
pub fn directory_images(tree: &Tree, item: &Item, offset: i64) -> Vec<Image> {
    let parent = item.parent().and_then(|id| tree.item(id));
    let first_child_slot = i64::from(parent.is_some());

    parent
        .map(|p| p.image(offset))
        .into_iter()
        .chain(
            item.children()
                .iter()
                .filter_map(|id| tree.item(*id))
                .zip(first_child_slot..)
                .map(|(child, slot)| child.image(offset - slot)),
        )
        .collect()
}

/// Renders every line of a file, then the characters of the caret line.
///
/// Directories have no file-local records.
pub fn file_images(item: &Item, caret: Caret) -> Vec<Image> {
    let lines = item.lines();
    let mut images: Vec<Image> = lines
        .iter()
        .zip(0i64..)
        .map(|(line, index)| line_image(line, caret.line as i64 - index))
        .collect();

    if let Some(line) = lines.get(caret.line) {
        images.extend(
            line.characters()
                .iter()
                .zip(0i64..)
                .map(|(c, index)| character_image(c, index - caret.column as i64)),
        );
    }

    images
}

fn line_image(line: &Line, delta: i64) -> Image {
    content_image(line.id(), labels::LINE, labels::LINE_DIRECTION, delta)
}

fn character_image(character: &Character, delta: i64) -> Image {
    let shape = character.shape().to_string();
    content_image(character.id(), &shape, labels::CHAR_DIRECTION, delta)
}

fn content_image(id: UnitId, kind: &str, axis: &str, delta: i64) -> Image {
    Image {
        id,
        name: String::new(),
        permanent: vec![Info::kind(labels::CONTENT_TYPE, kind)],
        transient: vec![Info::direction(axis, delta)],
    }
}
