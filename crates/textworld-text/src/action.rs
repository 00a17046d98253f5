//! The Ready/Step state machine.
//!
//! ## Learning: Probe, Then Act
//!
//! Every command is split into a pure legality probe ([`ready`]) and an
//! effect ([`step`]). `step` re-runs the probe itself, so calling it on an
//! illegal command is harmless: agents poll every action every tick and
//! only a fraction of them can actually fire.
//!
//! Nothing here knows about actors or events. The world looks up the
//! actor's [`ActorPos`] and hands it in together with the tree.

use textworld_api::{Action, UnitId};

use crate::cursor::{ActorPos, Caret};
use crate::key::{Command, Glyph, ItemCommand, SpecialKey};
use crate::tree::{Item, ItemKind, Line, Tree};

/// What an effective step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The actor moved onto another item
    Entered(UnitId),
    /// Only cursors moved
    Moved,
    /// Content of the file changed
    Edited(UnitId),
}

/// Builds the action menu of an actor.
///
/// `itemExec` is reserved and never materializes.
pub fn catalog(actor: UnitId) -> Vec<Action<Command>> {
    ItemCommand::CATALOG
        .into_iter()
        .map(Command::Item)
        .chain(Glyph::all().map(Command::Press))
        .chain(SpecialKey::ALL.into_iter().map(Command::Special))
        .map(|command| Action::new(command.name(), actor, command))
        .collect()
}

/// Returns true if `command` is legal for an actor at `pos`.
pub fn ready(tree: &Tree, pos: &ActorPos, command: &Command) -> bool {
    match *command {
        Command::Item(cmd) => item_ready(tree, pos, cmd),
        Command::Press(_) => {
            current_line(tree, pos).is_some_and(|line| pos.caret.column <= line.len())
        }
        Command::Special(key) => special_ready(tree, pos, key),
    }
}

/// Performs `command` if it is legal. Returns what changed, or `None`
/// when nothing happened.
pub fn step(tree: &mut Tree, pos: &mut ActorPos, command: &Command) -> Option<Effect> {
    if !ready(tree, pos, command) {
        return None;
    }

    match *command {
        Command::Item(cmd) => item_step(tree, pos, cmd),
        Command::Press(glyph) => {
            let character = tree.new_character(glyph.as_char());
            let file = pos.item;
            let line = tree.lines_mut(file)?.get_mut(pos.caret.line)?;
            line.insert(pos.caret.column, character);
            pos.caret.column += 1;
            Some(Effect::Edited(file))
        }
        Command::Special(key) => special_step(tree, pos, key),
    }
}

fn item_ready(tree: &Tree, pos: &ActorPos, cmd: ItemCommand) -> bool {
    let Some(item) = tree.item(pos.item) else {
        return false;
    };

    match item.kind() {
        // The only way off a file is up to its parent.
        ItemKind::File { .. } => {
            cmd == ItemCommand::Enter && pos.item_cursor == 0 && item.parent().is_some()
        }
        ItemKind::Directory { .. } => {
            let size = item.slot_count();
            match cmd {
                ItemCommand::Up => pos.item_cursor > 0 && pos.item_cursor < size,
                ItemCommand::Down => pos.item_cursor + 1 < size,
                ItemCommand::Enter => pos.item_cursor < size,
                ItemCommand::Exec => false,
            }
        }
    }
}

fn item_step(tree: &Tree, pos: &mut ActorPos, cmd: ItemCommand) -> Option<Effect> {
    let item = tree.item(pos.item)?;

    match (item.kind(), cmd) {
        (ItemKind::File { .. }, _) => {
            pos.enter(item.parent()?);
            Some(Effect::Entered(pos.item))
        }
        (ItemKind::Directory { .. }, ItemCommand::Up) => {
            pos.item_cursor -= 1;
            Some(Effect::Moved)
        }
        (ItemKind::Directory { .. }, ItemCommand::Down) => {
            pos.item_cursor += 1;
            Some(Effect::Moved)
        }
        (ItemKind::Directory { .. }, ItemCommand::Enter) => {
            pos.enter(selected(item, pos.item_cursor)?);
            Some(Effect::Entered(pos.item))
        }
        (ItemKind::Directory { .. }, ItemCommand::Exec) => None,
    }
}

/// Resolves an item-cursor slot of a directory to an item id.
fn selected(dir: &Item, slot: usize) -> Option<UnitId> {
    match dir.parent() {
        Some(parent) if slot == 0 => Some(parent),
        Some(_) => dir.children().get(slot - 1).copied(),
        None => dir.children().get(slot).copied(),
    }
}

/// Returns the caret line when the actor is on a file and the line exists.
fn current_line<'a>(tree: &'a Tree, pos: &ActorPos) -> Option<&'a Line> {
    tree.item(pos.item)?.lines().get(pos.caret.line)
}

fn special_ready(tree: &Tree, pos: &ActorPos, key: SpecialKey) -> bool {
    let Some(item) = tree.item(pos.item) else {
        return false;
    };
    let Some(line) = item.lines().get(pos.caret.line) else {
        return false;
    };

    let Caret { line: row, column } = pos.caret;
    match key {
        SpecialKey::Backspace => column > 0 && column <= line.len(),
        SpecialKey::Enter => column <= line.len(),
        SpecialKey::Left => column > 0,
        SpecialKey::Right => column < line.len(),
        SpecialKey::Up => row > 0,
        SpecialKey::Down => row + 1 < item.lines().len(),
    }
}

fn special_step(tree: &mut Tree, pos: &mut ActorPos, key: SpecialKey) -> Option<Effect> {
    let file = pos.item;
    match key {
        SpecialKey::Backspace => {
            let line = tree.lines_mut(file)?.get_mut(pos.caret.line)?;
            line.remove(pos.caret.column - 1)?;
            pos.caret.column -= 1;
            Some(Effect::Edited(file))
        }
        SpecialKey::Enter => {
            let id = tree.ids().next();
            let lines = tree.lines_mut(file)?;
            let right = lines.get_mut(pos.caret.line)?.split_off(pos.caret.column, id);
            lines.insert(pos.caret.line + 1, right);
            pos.caret.line += 1;
            pos.caret.column = 0;
            Some(Effect::Edited(file))
        }
        SpecialKey::Left => {
            pos.caret.column -= 1;
            Some(Effect::Moved)
        }
        SpecialKey::Right => {
            pos.caret.column += 1;
            Some(Effect::Moved)
        }
        // Vertical moves keep the column even past the end of the new line.
        SpecialKey::Up => {
            pos.caret.line -= 1;
            Some(Effect::Moved)
        }
        SpecialKey::Down => {
            pos.caret.line += 1;
            Some(Effect::Moved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use textworld_api::UnitIds;

    fn cmd(s: &str) -> Command {
        Command::parse(s).unwrap()
    }

    fn file_with(text: &str) -> (Tree, ActorPos) {
        let mut tree = Tree::new(UnitIds::new());
        let f = tree.write_file(tree.root(), "f", text).unwrap();
        (tree, ActorPos::at(f))
    }

    fn text(tree: &Tree, pos: &ActorPos) -> String {
        tree.file_text(pos.item).unwrap()
    }

    #[test]
    fn test_catalog() {
        let actor = UnitId::new(3);
        let actions = catalog(actor);
        assert_eq!(actions.len(), 3 + 63 + 6);
        assert!(actions.iter().all(|a| a.actor() == actor));
        assert!(actions.iter().all(|a| a.name() != "itemExec"));
        assert_eq!(actions[0].name(), "itemUp");
        assert_eq!(actions[3].name(), "key0");
        assert_eq!(actions.last().unwrap().name(), "right");
    }

    #[test]
    fn test_exec_never_ready() {
        let mut tree = Tree::new(UnitIds::new());
        tree.new_directory(tree.root(), "d").unwrap();
        let mut pos = ActorPos::at(tree.root());
        let exec = Command::Item(ItemCommand::Exec);
        assert!(!ready(&tree, &pos, &exec));
        assert!(step(&mut tree, &mut pos, &exec).is_none());
    }

    #[test]
    fn test_unresolvable_item() {
        let mut tree = Tree::new(UnitIds::new());
        let mut pos = ActorPos::at(UnitId::new(777));
        for c in ["itemUp", "itemDown", "itemEnter", "a", "backspace", "enter", "up", "down", "left", "right"] {
            assert!(!ready(&tree, &pos, &cmd(c)), "{c} should not be ready");
            assert!(step(&mut tree, &mut pos, &cmd(c)).is_none());
        }
        assert_eq!(pos, ActorPos::at(UnitId::new(777)));
    }

    #[test]
    fn test_enter_from_file_goes_to_parent() {
        let (mut tree, mut pos) = file_with("abc");
        let root = tree.root();
        pos.caret = Caret::new(0, 2);

        assert!(!ready(&tree, &pos, &cmd("itemUp")));
        assert!(!ready(&tree, &pos, &cmd("itemDown")));

        pos.item_cursor = 1;
        assert!(!ready(&tree, &pos, &cmd("itemEnter")));
        assert!(step(&mut tree, &mut pos, &cmd("itemEnter")).is_none());

        pos.item_cursor = 0;
        assert_eq!(step(&mut tree, &mut pos, &cmd("itemEnter")), Some(Effect::Entered(root)));
        assert_eq!(pos, ActorPos::at(root));
    }

    #[test]
    fn test_editing_requires_file() {
        let mut tree = Tree::new(UnitIds::new());
        let mut pos = ActorPos::at(tree.root());
        for c in ["0", "enter", "backspace", "left", "right", "up", "down"] {
            assert!(!ready(&tree, &pos, &cmd(c)));
            assert!(step(&mut tree, &mut pos, &cmd(c)).is_none());
        }
    }

    #[test]
    fn test_press_out_of_bounds() {
        let (mut tree, mut pos) = file_with("");
        pos.caret = Caret::new(1, 0);
        assert!(!ready(&tree, &pos, &cmd("0")));
        pos.caret = Caret::new(0, 1);
        assert!(!ready(&tree, &pos, &cmd("0")));
        assert!(step(&mut tree, &mut pos, &cmd("0")).is_none());
        assert_eq!(text(&tree, &pos), "");
    }

    #[test]
    fn test_press_splices_at_caret() {
        let (mut tree, mut pos) = file_with("ac");
        pos.caret.column = 1;
        assert!(step(&mut tree, &mut pos, &cmd("b")).is_some());
        assert_eq!(text(&tree, &pos), "abc");
        assert_eq!(pos.caret, Caret::new(0, 2));
    }

    #[test]
    fn test_horizontal_bounds() {
        let (tree, mut pos) = file_with("ab");
        assert!(!ready(&tree, &pos, &cmd("left")));
        assert!(!ready(&tree, &pos, &cmd("backspace")));
        assert!(ready(&tree, &pos, &cmd("right")));

        pos.caret.column = 2;
        assert!(ready(&tree, &pos, &cmd("left")));
        assert!(ready(&tree, &pos, &cmd("backspace")));
        assert!(!ready(&tree, &pos, &cmd("right")));
    }

    #[test]
    fn test_vertical_bounds_and_soft_column() {
        let (mut tree, mut pos) = file_with("abcd\nx");
        assert!(!ready(&tree, &pos, &cmd("up")));
        assert!(ready(&tree, &pos, &cmd("down")));

        pos.caret.column = 4;
        assert_eq!(step(&mut tree, &mut pos, &cmd("down")), Some(Effect::Moved));
        assert_eq!(pos.caret, Caret::new(1, 4));
        assert!(!ready(&tree, &pos, &cmd("down")));
        assert!(ready(&tree, &pos, &cmd("up")));

        // past the end: only moving left or vertically brings the caret back
        assert!(!ready(&tree, &pos, &cmd("a")));
        assert!(!ready(&tree, &pos, &cmd("enter")));
        assert!(!ready(&tree, &pos, &cmd("backspace")));
        assert!(!ready(&tree, &pos, &cmd("right")));
        assert!(ready(&tree, &pos, &cmd("left")));

        step(&mut tree, &mut pos, &cmd("left"));
        step(&mut tree, &mut pos, &cmd("left"));
        assert_eq!(pos.caret, Caret::new(1, 2));
        step(&mut tree, &mut pos, &cmd("left"));
        assert!(ready(&tree, &pos, &cmd("a")));

        step(&mut tree, &mut pos, &cmd("up"));
        assert_eq!(pos.caret, Caret::new(0, 1));
    }

    #[test]
    fn test_enter_at_end_of_line() {
        let (mut tree, mut pos) = file_with("ab");
        pos.caret.column = 2;
        let first = tree.item(pos.item).unwrap().lines()[0].id();

        assert!(step(&mut tree, &mut pos, &cmd("enter")).is_some());
        let lines = tree.item(pos.item).unwrap().lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "ab");
        assert_eq!(lines[0].id(), first);
        assert!(lines[1].is_empty());
        assert_eq!(pos.caret, Caret::new(1, 0));
    }

    #[test]
    fn test_enter_inserts_after_current_line() {
        let (mut tree, mut pos) = file_with("abcd\nzz");
        pos.caret.column = 1;
        step(&mut tree, &mut pos, &cmd("enter"));
        assert_eq!(text(&tree, &pos), "a\nbcd\nzz");
        assert_eq!(pos.caret, Caret::new(1, 0));
    }

    #[test]
    fn test_backspace_removes_before_caret() {
        let (mut tree, mut pos) = file_with("abc");
        pos.caret.column = 2;
        assert!(step(&mut tree, &mut pos, &cmd("backspace")).is_some());
        assert_eq!(text(&tree, &pos), "ac");
        assert_eq!(pos.caret.column, 1);
    }

    proptest! {
        #[test]
        fn prop_press_then_backspace_restores(
            text in "[a-z0-9 ]{0,12}",
            at in 0usize..13,
            code in 0usize..63,
        ) {
            let (mut tree, mut pos) = file_with(&text);
            pos.caret.column = at.min(text.len());
            let before = (tree.file_text(pos.item).unwrap(), pos);

            let press = Command::Press(Glyph::from_code(code).unwrap());
            prop_assert!(step(&mut tree, &mut pos, &press).is_some());
            prop_assert_eq!(pos.caret.column, before.1.caret.column + 1);
            prop_assert!(step(&mut tree, &mut pos, &cmd("backspace")).is_some());

            prop_assert_eq!(tree.file_text(pos.item).unwrap(), before.0);
            prop_assert_eq!(pos, before.1);
        }

        #[test]
        fn prop_enter_splits_line(text in "[a-z]{0,12}", at in 0usize..13) {
            let (mut tree, mut pos) = file_with(&text);
            let k = at.min(text.len());
            pos.caret.column = k;

            prop_assert!(step(&mut tree, &mut pos, &cmd("enter")).is_some());
            let lines = tree.item(pos.item).unwrap().lines();
            prop_assert_eq!(lines.len(), 2);
            prop_assert_eq!(lines[0].len(), k);
            prop_assert_eq!(lines[1].len(), text.len() - k);
            prop_assert_eq!(lines[0].text() + &lines[1].text(), text);
            prop_assert_eq!(pos.caret, Caret::new(1, 0));
        }
    }
}
