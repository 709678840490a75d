//! Graphviz rendering of a treap's shape.
//!
//! Every node is labelled with the debug representation of its key and its priority. Edges are
//! labelled `L` or `R` depending on the side of the child.

use crate::error::Result;
use crate::treap::entry::Entry;
use crate::treap::tree::BinaryTree;
use log::debug;
use std::fmt::Debug;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn escape(label: &str) -> String {
    let mut ret = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '\\' || c == '"' {
            ret.push('\\');
        }
        ret.push(c);
    }
    ret
}

/// Writes the topology of `tree` to `writer` in `dot` format.
///
/// # Examples
///
/// ```
/// use toolchest::treap::{write_dot, BinaryTree, SetEntry};
///
/// let mut tree = BinaryTree::new();
/// tree.insert(SetEntry(1));
///
/// let mut buffer = Vec::new();
/// write_dot(&tree, &mut buffer).unwrap();
/// let output = String::from_utf8(buffer).unwrap();
/// assert!(output.starts_with("digraph treap {"));
/// ```
pub fn write_dot<E, W>(tree: &BinaryTree<E>, writer: &mut W) -> io::Result<()>
where
    E: Entry,
    E::Key: Debug,
    W: Write,
{
    writeln!(writer, "digraph treap {{")?;
    let pool = tree.pool();
    let mut stack = Vec::new();
    stack.extend(tree.root());
    while let Some(index) = stack.pop() {
        let node = &pool[index];
        let label = escape(&format!("{:?}", node.entry.get_key()));
        writeln!(writer, "    n{} [label=\"{} (p={})\"];", index, label, node.priority)?;
        if let Some(left) = node.left {
            writeln!(writer, "    n{} -> n{} [label=\"L\"];", index, left)?;
            stack.push(left);
        }
        if let Some(right) = node.right {
            writeln!(writer, "    n{} -> n{} [label=\"R\"];", index, right)?;
            stack.push(right);
        }
    }
    writeln!(writer, "}}")
}

/// Writes the topology of `tree` in `dot` format to the file at `path`, replacing its contents.
pub fn dump_dot<E, P>(tree: &BinaryTree<E>, path: P) -> Result<()>
where
    E: Entry,
    E::Key: Debug,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(fs::File::create(path.as_ref())?);
    write_dot(tree, &mut writer)?;
    writer.flush()?;
    debug!("Wrote treap topology to {:?}.", path.as_ref());
    Ok(())
}
