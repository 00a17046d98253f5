//! The item tree: directories, files, lines and characters.
//!
//! ## Learning: Arenas Instead of Parent Pointers
//!
//! A tree where children own their nodes *and* nodes point back at their
//! parent is awkward with plain references: the back pointer would borrow
//! from the thing that owns it. An arena sidesteps this. Every item lives
//! in one `HashMap<UnitId, Item>`; a directory owns the *ids* of its
//! children and every item remembers its parent's id. Ids are plain
//! `Copy` values, so nothing borrows anything.
//!
//! File content does not need back pointers into the arena, so a file
//! simply owns its `Vec<Line>` and each line owns its `Vec<Character>`.

use std::collections::HashMap;

use textworld_api::{UnitId, UnitIds};

use crate::{TextError, TextResult};

/// A single glyph with an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    id: UnitId,
    shape: char,
}

impl Character {
    /// Returns the character id.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Returns the glyph.
    pub fn shape(&self) -> char {
        self.shape
    }
}

/// An ordered run of characters inside a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: UnitId,
    file: UnitId,
    characters: Vec<Character>,
}

impl Line {
    /// Returns the line id.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Returns the id of the file holding this line.
    pub fn file(&self) -> UnitId {
        self.file
    }

    /// Returns the characters in document order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Returns the number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if the line has no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Returns the line content as a string.
    pub fn text(&self) -> String {
        self.characters.iter().map(|c| c.shape).collect()
    }

    /// Splices a character in before column `at`.
    pub(crate) fn insert(&mut self, at: usize, character: Character) {
        self.characters.insert(at, character);
    }

    /// Removes the character at column `at`.
    pub(crate) fn remove(&mut self, at: usize) -> Option<Character> {
        (at < self.characters.len()).then(|| self.characters.remove(at))
    }

    /// Moves everything from column `at` onwards into a new line with id `id`.
    pub(crate) fn split_off(&mut self, at: usize, id: UnitId) -> Line {
        Line {
            id,
            file: self.file,
            characters: self.characters.split_off(at),
        }
    }
}

/// Kind-specific payload of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// Child item ids in creation order
    Directory { children: Vec<UnitId> },
    /// Lines in document order; never empty
    File { lines: Vec<Line> },
}

/// A named node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: UnitId,
    parent: Option<UnitId>,
    name: String,
    kind: ItemKind,
}

impl Item {
    /// Returns the item id.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Returns the parent id; `None` only for the root.
    pub fn parent(&self) -> Option<UnitId> {
        self.parent
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind payload.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Returns true for directories.
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, ItemKind::Directory { .. })
    }

    /// Returns true for files.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, ItemKind::File { .. })
    }

    /// Returns the children of a directory (empty for files).
    pub fn children(&self) -> &[UnitId] {
        match &self.kind {
            ItemKind::Directory { children } => children,
            ItemKind::File { .. } => &[],
        }
    }

    /// Returns the lines of a file (empty for directories).
    pub fn lines(&self) -> &[Line] {
        match &self.kind {
            ItemKind::Directory { .. } => &[],
            ItemKind::File { lines } => lines,
        }
    }

    /// Number of item-cursor slots: the children plus a leading parent slot
    /// when the item has a parent.
    pub fn slot_count(&self) -> usize {
        self.children().len() + usize::from(self.parent.is_some())
    }
}

/// Arena holding every item of one world.
#[derive(Debug, Clone)]
pub struct Tree {
    ids: UnitIds,
    root: UnitId,
    items: HashMap<UnitId, Item>,
}

impl Tree {
    /// Creates a tree holding a single unnamed root directory.
    pub fn new(ids: UnitIds) -> Self {
        let root = ids.next();
        let mut items = HashMap::new();
        items.insert(
            root,
            Item {
                id: root,
                parent: None,
                name: String::new(),
                kind: ItemKind::Directory {
                    children: Vec::new(),
                },
            },
        );

        Self { ids, root, items }
    }

    /// Returns the root directory id.
    pub fn root(&self) -> UnitId {
        self.root
    }

    /// Returns the id generator shared by this tree.
    pub fn ids(&self) -> &UnitIds {
        &self.ids
    }

    /// Looks up an item.
    pub fn item(&self, id: UnitId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Returns the number of items, root included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: the root exists for the tree's whole life.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all items in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Creates a directory under `parent`.
    pub fn new_directory(&mut self, parent: UnitId, name: impl Into<String>) -> TextResult<UnitId> {
        self.attach(
            parent,
            name.into(),
            ItemKind::Directory {
                children: Vec::new(),
            },
        )
    }

    /// Creates a file holding one empty line under `parent`.
    pub fn new_file(&mut self, parent: UnitId, name: impl Into<String>) -> TextResult<UnitId> {
        self.write_file(parent, name, "")
    }

    /// Creates a file under `parent` whose content is `text`, split on `\n`.
    pub fn write_file(
        &mut self,
        parent: UnitId,
        name: impl Into<String>,
        text: &str,
    ) -> TextResult<UnitId> {
        self.ensure_directory(parent)?;
        let id = self.ids.next();
        let lines = text
            .split('\n')
            .map(|raw| {
                let mut line = self.new_line(id);
                line.characters = raw.chars().map(|c| self.new_character(c)).collect();
                line
            })
            .collect();

        self.insert(id, parent, name.into(), ItemKind::File { lines });
        Ok(id)
    }

    /// Allocates an empty line belonging to `file`.
    pub fn new_line(&self, file: UnitId) -> Line {
        Line {
            id: self.ids.next(),
            file,
            characters: Vec::new(),
        }
    }

    /// Allocates a character.
    pub fn new_character(&self, shape: char) -> Character {
        Character {
            id: self.ids.next(),
            shape,
        }
    }

    /// Returns the lines of a file for editing.
    pub(crate) fn lines_mut(&mut self, file: UnitId) -> Option<&mut Vec<Line>> {
        match &mut self.items.get_mut(&file)?.kind {
            ItemKind::File { lines } => Some(lines),
            ItemKind::Directory { .. } => None,
        }
    }

    /// Returns the content of a file, lines joined with `\n`.
    pub fn file_text(&self, file: UnitId) -> Option<String> {
        let item = self.item(file).filter(|i| i.is_file())?;
        Some(
            item.lines()
                .iter()
                .map(Line::text)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// Returns the slash-separated path of an item; the root is `""`.
    pub fn path_of(&self, id: UnitId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.item(id)?;
        while let Some(parent) = current.parent {
            names.push(current.name.as_str());
            current = self.item(parent)?;
        }
        names.reverse();
        Some(names.join("/"))
    }

    /// Resolves a slash-separated path from the root. First name match wins.
    pub fn find(&self, path: &str) -> Option<UnitId> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self.root, |dir, part| self.child_named(dir, part))
    }

    /// Returns the first child of `dir` called `name`.
    pub fn child_named(&self, dir: UnitId, name: &str) -> Option<UnitId> {
        self.item(dir)?
            .children()
            .iter()
            .copied()
            .find(|child| self.item(*child).is_some_and(|c| c.name == name))
    }

    fn ensure_directory(&self, id: UnitId) -> TextResult<()> {
        match self.item(id) {
            Some(item) if item.is_directory() => Ok(()),
            Some(_) => Err(TextError::NotADirectory(id)),
            None => Err(TextError::ItemNotFound(id)),
        }
    }

    fn attach(&mut self, parent: UnitId, name: String, kind: ItemKind) -> TextResult<UnitId> {
        self.ensure_directory(parent)?;
        let id = self.ids.next();
        self.insert(id, parent, name, kind);
        Ok(id)
    }

    fn insert(&mut self, id: UnitId, parent: UnitId, name: String, kind: ItemKind) {
        if let Some(ItemKind::Directory { children }) =
            self.items.get_mut(&parent).map(|p| &mut p.kind)
        {
            children.push(id);
        }

        tracing::debug!("Created item {} ({:?}) under {}", id, name, parent);
        self.items.insert(
            id,
            Item {
                id,
                parent: Some(parent),
                name,
                kind,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Tree {
        Tree::new(UnitIds::new())
    }

    #[test]
    fn test_root() {
        let tree = tree();
        let root = tree.item(tree.root()).unwrap();
        assert!(root.name().is_empty());
        assert!(root.parent().is_none());
        assert!(root.is_directory());
        assert!(root.children().is_empty());
        assert_eq!(root.slot_count(), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_directory_constructor() {
        let mut tree = tree();
        let root = tree.root();
        let d = tree.new_directory(root, "abc").unwrap();

        let item = tree.item(d).unwrap();
        assert_eq!(item.name(), "abc");
        assert_eq!(item.parent(), Some(root));
        assert_ne!(d, root);
        assert!(item.children().is_empty());
        assert_eq!(item.slot_count(), 1);
        assert_eq!(tree.item(root).unwrap().children(), &[d]);
    }

    #[test]
    fn test_file_constructor() {
        let mut tree = tree();
        let root = tree.root();
        let f = tree.new_file(root, "abc").unwrap();

        let item = tree.item(f).unwrap();
        assert!(item.is_file());
        assert_eq!(item.parent(), Some(root));
        assert_eq!(item.lines().len(), 1);
        assert!(item.lines()[0].is_empty());
        assert_eq!(item.lines()[0].file(), f);
        assert!(item.children().is_empty());
    }

    #[test]
    fn test_children_keep_creation_order() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.new_file(root, "a").unwrap();
        let b = tree.new_directory(root, "b").unwrap();
        let c = tree.new_file(root, "c").unwrap();
        assert_eq!(tree.item(root).unwrap().children(), &[a, b, c]);
    }

    #[test]
    fn test_cannot_attach_to_file_or_unknown_parent() {
        let mut tree = tree();
        let f = tree.new_file(tree.root(), "f").unwrap();
        assert!(matches!(
            tree.new_directory(f, "d"),
            Err(TextError::NotADirectory(id)) if id == f
        ));

        let missing = UnitId::new(9_999);
        assert!(matches!(
            tree.new_file(missing, "g"),
            Err(TextError::ItemNotFound(id)) if id == missing
        ));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_ids_unique_across_kinds() {
        let mut tree = tree();
        let f = tree.write_file(tree.root(), "f", "ab\nc").unwrap();
        let item = tree.item(f).unwrap();

        let mut seen = vec![tree.root(), f];
        for line in item.lines() {
            seen.push(line.id());
            seen.extend(line.characters().iter().map(Character::id));
        }
        let count = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), count);
    }

    #[test]
    fn test_write_file_and_text() {
        let mut tree = tree();
        let f = tree.write_file(tree.root(), "f", "ab\n\ncd").unwrap();
        let item = tree.item(f).unwrap();
        assert_eq!(item.lines().len(), 3);
        assert_eq!(item.lines()[0].text(), "ab");
        assert!(item.lines()[1].is_empty());
        assert_eq!(tree.file_text(f).unwrap(), "ab\n\ncd");
        assert!(tree.file_text(tree.root()).is_none());
    }

    #[test]
    fn test_paths() {
        let mut tree = tree();
        let proj = tree.new_directory(tree.root(), "proj").unwrap();
        let src = tree.new_directory(proj, "src").unwrap();
        let main = tree.new_file(src, "main.rs").unwrap();

        assert_eq!(tree.path_of(main).unwrap(), "proj/src/main.rs");
        assert_eq!(tree.path_of(tree.root()).unwrap(), "");
        assert_eq!(tree.find("proj/src/main.rs"), Some(main));
        assert_eq!(tree.find("/proj/src/"), Some(src));
        assert_eq!(tree.find(""), Some(tree.root()));
        assert!(tree.find("proj/lib").is_none());
        assert_eq!(tree.child_named(proj, "src"), Some(src));
    }

    #[test]
    fn test_line_editing_primitives() {
        let tree = tree();
        let mut line = tree.new_line(tree.root());
        line.insert(0, tree.new_character('a'));
        line.insert(1, tree.new_character('c'));
        line.insert(1, tree.new_character('b'));
        assert_eq!(line.text(), "abc");

        let right = line.split_off(1, tree.ids().next());
        assert_eq!(line.text(), "a");
        assert_eq!(right.text(), "bc");
        assert_ne!(right.id(), line.id());

        assert_eq!(line.remove(0).map(|c| c.shape()), Some('a'));
        assert!(line.remove(0).is_none());
    }
}
