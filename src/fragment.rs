//! Colored text fragments.
//!
//! A `Fragment` is either a *leaf*, holding text plus an optional foreground
//! and background color, or a *composite*, holding an ordered list of child
//! fragments and nothing else. Fragments compose like strings do:
//!
//! ```
//! use tinted::presets::{back, fore};
//! use tinted::RenderConfig;
//!
//! let config = RenderConfig::default();
//! let greeting = fore::red() + "Hello" + back::blue() + " World"
//!     + fore::reset(&config);
//! assert_eq!(greeting.flatten(), "Hello World");
//! ```
//!
//! # Identity
//!
//! `Fragment` is a handle. Cloning it yields another handle to the *same*
//! node, and some compositions mutate their operand in place instead of
//! building a new node:
//!
//! | operation            | leaf operand                     | composite operand                   |
//! |----------------------|----------------------------------|-------------------------------------|
//! | `frag + "s"`         | appends to the leaf's text       | appends to the last child's text    |
//! | `"s" + frag`         | new composite `["s", frag]`      | inserts leaf `"s"` at the front     |
//! | `a + b`              | new composite                    | new composite (children shared)     |
//!
//! Trailing plain text thus joins whatever color run precedes it. Because
//! `a + b` shares the children of composite operands, an in-place append
//! through one composite is visible through every composite holding the same
//! child. Use `Fragment::deep_clone` to get a fragment that shares nothing.
//!
//! Fragments are single-threaded values (`!Send`); the terminal they render
//! to is a shared resource anyway, see `StandardStream::lock`.

use std::cell::RefCell;
use std::fmt;
use std::io;
use std::ops::{Add, AddAssign};
use std::rc::Rc;

use crate::{Color, RenderConfig, WriteColor};

#[derive(Debug)]
enum Node {
    Leaf {
        text: String,
        fore: Option<Color>,
        back: Option<Color>,
    },
    // Never empty.
    Composite(Vec<Fragment>),
}

/// A piece of text with optional colors, or a sequence of such pieces.
///
/// This is a handle: `clone` shares the node, `deep_clone` copies it.
/// Appending text with `+` changes the left operand in place, while
/// joining two fragments with `+` builds a new composite that shares the
/// operands' children.
#[derive(Clone)]
pub struct Fragment(Rc<RefCell<Node>>);

impl Default for Fragment {
    fn default() -> Fragment {
        Fragment::new()
    }
}

impl Fragment {
    fn from_node(node: Node) -> Fragment {
        Fragment(Rc::new(RefCell::new(node)))
    }

    fn leaf(text: String, fore: Option<Color>, back: Option<Color>) -> Fragment {
        Fragment::from_node(Node::Leaf { text, fore, back })
    }

    /// Create an empty leaf with no colors.
    pub fn new() -> Fragment {
        Fragment::leaf(String::new(), None, None)
    }

    /// Create a leaf holding `text` with no colors.
    pub fn from_text(text: impl Into<String>) -> Fragment {
        Fragment::leaf(text.into(), None, None)
    }

    /// Create an empty leaf that switches the foreground to `color`.
    pub fn from_fore(color: Color) -> Fragment {
        Fragment::leaf(String::new(), Some(color), None)
    }

    /// Create an empty leaf that switches the background to `color`.
    pub fn from_back(color: Color) -> Fragment {
        Fragment::leaf(String::new(), None, Some(color))
    }

    /// Create an empty leaf that switches both colors.
    pub fn colors(fore: Color, back: Color) -> Fragment {
        Fragment::leaf(String::new(), Some(fore), Some(back))
    }

    /// Create a leaf from text and optional colors.
    ///
    /// A `None` color leaves the terminal's current color in place when the
    /// leaf is rendered.
    pub fn with_colors(
        text: impl Into<String>,
        fore: Option<Color>,
        back: Option<Color>,
    ) -> Fragment {
        Fragment::leaf(text.into(), fore, back)
    }

    /// Create an empty leaf that switches to the configured default colors.
    pub fn reset_all(config: &RenderConfig) -> Fragment {
        Fragment::colors(config.default_fore(), config.default_back())
    }

    /// Returns true if this is a composite fragment.
    pub fn is_composite(&self) -> bool {
        matches!(*self.0.borrow(), Node::Composite(_))
    }

    /// The leaf's own text. Composites have none and return "".
    ///
    /// Use `flatten` for the text of a whole tree.
    pub fn text(&self) -> String {
        match *self.0.borrow() {
            Node::Leaf { ref text, .. } => text.clone(),
            Node::Composite(_) => String::new(),
        }
    }

    /// The leaf's foreground color, if set. Always `None` for composites.
    pub fn fore(&self) -> Option<Color> {
        match *self.0.borrow() {
            Node::Leaf { fore, .. } => fore,
            Node::Composite(_) => None,
        }
    }

    /// The leaf's background color, if set. Always `None` for composites.
    pub fn back(&self) -> Option<Color> {
        match *self.0.borrow() {
            Node::Leaf { back, .. } => back,
            Node::Composite(_) => None,
        }
    }

    /// Set or clear the leaf's foreground color.
    ///
    /// This has no effect on composites, which carry no color of their own.
    pub fn set_fore(&self, color: Option<Color>) -> &Fragment {
        if let Node::Leaf { ref mut fore, .. } = *self.0.borrow_mut() {
            *fore = color;
        }
        self
    }

    /// Set or clear the leaf's background color.
    ///
    /// This has no effect on composites, which carry no color of their own.
    pub fn set_back(&self, color: Option<Color>) -> &Fragment {
        if let Node::Leaf { ref mut back, .. } = *self.0.borrow_mut() {
            *back = color;
        }
        self
    }

    /// Handles to the children of a composite, in render order. Empty for
    /// leaves.
    pub fn children(&self) -> Vec<Fragment> {
        match *self.0.borrow() {
            Node::Leaf { .. } => vec![],
            Node::Composite(ref children) => children.clone(),
        }
    }

    /// The number of leaves in this tree.
    pub fn leaf_count(&self) -> usize {
        match *self.0.borrow() {
            Node::Leaf { .. } => 1,
            Node::Composite(ref children) => {
                children.iter().map(Fragment::leaf_count).sum()
            }
        }
    }

    /// Returns true if both handles refer to the same fragment.
    pub fn ptr_eq(&self, other: &Fragment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Copy the whole tree so that the result shares no node with `self`.
    pub fn deep_clone(&self) -> Fragment {
        let node = match *self.0.borrow() {
            Node::Leaf { ref text, fore, back } => {
                Node::Leaf { text: text.clone(), fore, back }
            }
            Node::Composite(ref children) => Node::Composite(
                children.iter().map(Fragment::deep_clone).collect(),
            ),
        };
        Fragment::from_node(node)
    }

    /// Append plain text, in place.
    ///
    /// On a leaf the text is appended to the leaf's own text. On a composite
    /// it is appended to the last child, so it takes that child's colors.
    /// Returns a handle to `self`.
    pub fn append_text(&self, text: &str) -> Fragment {
        // Release the parent borrow before touching the child.
        let last = match *self.0.borrow_mut() {
            Node::Leaf { text: ref mut own, .. } => {
                own.push_str(text);
                None
            }
            Node::Composite(ref mut children) => {
                if children.is_empty() {
                    children.push(Fragment::from_text(text));
                    None
                } else {
                    children.last().cloned()
                }
            }
        };
        if let Some(last) = last {
            last.append_text(text);
        }
        self.clone()
    }

    /// Prepend plain text as a colorless leaf.
    ///
    /// On a composite the new leaf is inserted in front of the existing
    /// children, in place, and a handle to `self` is returned. On a leaf a
    /// new composite `[text, self]` is returned and `self` is left alone.
    pub fn prepend_text(&self, text: &str) -> Fragment {
        if let Node::Composite(ref mut children) = *self.0.borrow_mut() {
            children.insert(0, Fragment::from_text(text));
            return self.clone();
        }
        Fragment::from_node(Node::Composite(vec![
            Fragment::from_text(text),
            self.clone(),
        ]))
    }

    /// Concatenate two fragments into a new composite.
    ///
    /// Each operand contributes its children if it is a composite and itself
    /// otherwise. Only one level is spliced in; the children are shared with
    /// the operands, not copied.
    pub fn concat(&self, other: &Fragment) -> Fragment {
        let mut children = Vec::new();
        for operand in [self, other] {
            match *operand.0.borrow() {
                Node::Leaf { .. } => children.push(operand.clone()),
                Node::Composite(ref kids) => children.extend(kids.iter().cloned()),
            }
        }
        tracing::trace!(children = children.len(), "concatenated fragments");
        Fragment::from_node(Node::Composite(children))
    }

    /// The plain text of this tree: all leaf texts in render order, without
    /// any color information.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        match *self.0.borrow() {
            Node::Leaf { ref text, .. } => out.push_str(text),
            Node::Composite(ref children) => {
                for child in children {
                    child.flatten_into(out);
                }
            }
        }
    }

    /// Calls `f` with the text and colors of every leaf, depth first and
    /// left to right, stopping at the first error.
    fn try_for_each_leaf<F>(&self, f: &mut F) -> io::Result<()>
    where
        F: FnMut(&str, Option<Color>, Option<Color>) -> io::Result<()>,
    {
        match *self.0.borrow() {
            Node::Leaf { ref text, fore, back } => f(text, fore, back),
            Node::Composite(ref children) => {
                for child in children {
                    child.try_for_each_leaf(f)?;
                }
                Ok(())
            }
        }
    }

    /// Switch the sink to this leaf's colors without writing any text.
    ///
    /// Unset colors are left as they are. Composites carry no colors, so
    /// this does nothing for them.
    pub fn apply_colors<W: WriteColor + ?Sized>(
        &self,
        wtr: &mut W,
    ) -> io::Result<()> {
        if let Node::Leaf { fore, back, .. } = *self.0.borrow() {
            apply(wtr, fore, back)?;
        }
        Ok(())
    }

    fn render_leaves<W: WriteColor + ?Sized>(
        &self,
        wtr: &mut W,
    ) -> io::Result<usize> {
        let mut leaves = 0;
        self.try_for_each_leaf(&mut |text, fore, back| {
            leaves += 1;
            apply(wtr, fore, back)?;
            wtr.write_all(text.as_bytes())
        })?;
        Ok(leaves)
    }

    /// Write this fragment to `wtr`, switching colors leaf by leaf.
    ///
    /// For every leaf, its foreground is set if it has one, then its
    /// background if it has one, then its text is written. If the
    /// configuration asks for it, the sink is reset once at the very end.
    ///
    /// Errors from the sink are returned as is; the sink may then hold a
    /// partial render.
    pub fn render<W: WriteColor + ?Sized>(
        &self,
        wtr: &mut W,
        config: &RenderConfig,
    ) -> io::Result<()> {
        let leaves = self.render_leaves(wtr)?;
        if config.auto_reset() {
            wtr.reset()?;
        }
        tracing::trace!(leaves, auto_reset = config.auto_reset(), "rendered");
        Ok(())
    }

    /// Like `render`, but writes a line terminator after the last leaf.
    ///
    /// The reset, if enabled, comes after the terminator.
    pub fn render_line<W: WriteColor + ?Sized>(
        &self,
        wtr: &mut W,
        config: &RenderConfig,
    ) -> io::Result<()> {
        let leaves = self.render_leaves(wtr)?;
        wtr.write_all(b"\n")?;
        if config.auto_reset() {
            wtr.reset()?;
        }
        tracing::trace!(leaves, auto_reset = config.auto_reset(), "rendered line");
        Ok(())
    }

    /// Write a tree dump of this fragment for debugging.
    ///
    /// Every node prints its text and whether each color is set; composites
    /// follow with a `children:` marker and their children, indented two
    /// more spaces.
    pub fn visualize<W: io::Write>(&self, mut wtr: W) -> io::Result<()> {
        self.visualize_at(&mut wtr, 0)
    }

    fn visualize_at<W: io::Write>(
        &self,
        wtr: &mut W,
        indent: usize,
    ) -> io::Result<()> {
        let pad = " ".repeat(indent);
        writeln!(wtr, "{pad}- text: '{}'", self.text())?;
        writeln!(wtr, "{pad}  fore{}", ColorField(self.fore()))?;
        writeln!(wtr, "{pad}  back{}", ColorField(self.back()))?;
        let children = self.children();
        if children.is_empty() {
            return Ok(());
        }
        writeln!(wtr, "{pad}  children:")?;
        for child in &children {
            child.visualize_at(wtr, indent + 2)?;
        }
        Ok(())
    }
}

fn apply<W: WriteColor + ?Sized>(
    wtr: &mut W,
    fore: Option<Color>,
    back: Option<Color>,
) -> io::Result<()> {
    if let Some(color) = fore {
        wtr.set_fg(color)?;
    }
    if let Some(color) = back {
        wtr.set_bg(color)?;
    }
    Ok(())
}

struct ColorField(Option<Color>);

impl fmt::Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(color) => write!(f, "(set): {color}"),
            None => f.write_str("(unset): -"),
        }
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0.borrow() {
            Node::Leaf { ref text, fore, back } => f
                .debug_struct("Leaf")
                .field("text", text)
                .field("fore", &fore)
                .field("back", &back)
                .finish(),
            Node::Composite(ref children) => {
                f.debug_tuple("Composite").field(children).finish()
            }
        }
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Fragment {
        Fragment::from_text(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Fragment {
        Fragment::from_text(text)
    }
}

impl Add<&str> for Fragment {
    type Output = Fragment;

    fn add(self, rhs: &str) -> Fragment {
        self.append_text(rhs)
    }
}

impl AddAssign<&str> for Fragment {
    fn add_assign(&mut self, rhs: &str) {
        self.append_text(rhs);
    }
}

impl Add<Fragment> for &str {
    type Output = Fragment;

    fn add(self, rhs: Fragment) -> Fragment {
        rhs.prepend_text(self)
    }
}

impl Add<Fragment> for Fragment {
    type Output = Fragment;

    fn add(self, rhs: Fragment) -> Fragment {
        self.concat(&rhs)
    }
}

impl Add<&Fragment> for Fragment {
    type Output = Fragment;

    fn add(self, rhs: &Fragment) -> Fragment {
        self.concat(rhs)
    }
}
