//! Reading and rewriting the document outline (bookmarks).

use crate::ComposerError;
use crate::encoding::decode_title;
use log::{debug, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::{HashMap, HashSet};
use tocpress_types::OutlineItem;

/// Named destinations and action chains are followed at most this deep.
const MAX_INDIRECTION: usize = 16;

/// Outline items nested deeper than this are not read.
const MAX_OUTLINE_DEPTH: u8 = 64;

pub(crate) fn catalog_id(doc: &Document) -> Result<ObjectId, ComposerError> {
    Ok(doc.trailer.get(b"Root")?.as_reference()?)
}

/// Flattens the outline tree in document order. Level 1 is the top of the tree.
///
/// Items with an empty title or a destination that does not resolve to a page
/// of this document are skipped; their children are still read.
pub(crate) fn read_outline(doc: &Document) -> Result<Vec<OutlineItem>, ComposerError> {
    let catalog = doc.get_dictionary(catalog_id(doc)?)?;
    let Ok(outlines) = catalog.get(b"Outlines") else {
        return Ok(Vec::new());
    };
    let (_, outlines) = doc.dereference(outlines)?;
    let Ok(first) = outlines.as_dict()?.get(b"First").and_then(Object::as_reference) else {
        return Ok(Vec::new());
    };

    let mut reader = OutlineReader {
        doc,
        catalog,
        page_index: doc
            .get_pages()
            .into_iter()
            .map(|(number, id)| (id, number as usize - 1))
            .collect(),
        visited: HashSet::new(),
        items: Vec::new(),
    };
    reader.walk(first, 1)?;
    debug!("Read {} outline items.", reader.items.len());
    Ok(reader.items)
}

struct OutlineReader<'a> {
    doc: &'a Document,
    catalog: &'a Dictionary,
    page_index: HashMap<ObjectId, usize>,
    visited: HashSet<ObjectId>,
    items: Vec<OutlineItem>,
}

impl<'a> OutlineReader<'a> {
    fn walk(&mut self, first: ObjectId, level: u8) -> Result<(), ComposerError> {
        let doc = self.doc;
        let mut next = Some(first);
        while let Some(id) = next {
            if !self.visited.insert(id) {
                warn!("Outline item {:?} is referenced twice; ignoring the cycle.", id);
                break;
            }
            let item = doc.get_dictionary(id)?;
            let title = item
                .get(b"Title")
                .and_then(|t| doc.dereference(t))
                .ok()
                .and_then(|(_, t)| decode_title(t))
                .unwrap_or_default();
            let title = title.trim();

            match self.destination_page(item) {
                Some(page) if !title.is_empty() => {
                    self.items.push(OutlineItem::new(level, title, page));
                }
                Some(_) => warn!("Skipping outline item {:?} with an empty title.", id),
                None => warn!("Skipping outline item '{}': destination does not resolve to a page.", title),
            }

            if let Ok(child) = item.get(b"First").and_then(Object::as_reference) {
                if level < MAX_OUTLINE_DEPTH {
                    self.walk(child, level + 1)?;
                } else {
                    warn!("Outline below '{}' nests deeper than {} levels; skipping it.", title, MAX_OUTLINE_DEPTH);
                }
            }
            next = item.get(b"Next").and_then(Object::as_reference).ok();
        }
        Ok(())
    }

    fn destination_page(&self, item: &Dictionary) -> Option<usize> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve_dest(dest, 0);
        }
        let (_, action) = self.doc.dereference(item.get(b"A").ok()?).ok()?;
        let action = action.as_dict().ok()?;
        if action.get(b"S").and_then(Object::as_name).ok()? != b"GoTo" {
            return None;
        }
        self.resolve_dest(action.get(b"D").ok()?, 0)
    }

    fn resolve_dest(&self, dest: &Object, depth: usize) -> Option<usize> {
        if depth > MAX_INDIRECTION {
            return None;
        }
        let (_, dest) = self.doc.dereference(dest).ok()?;
        match dest {
            Object::Array(parts) => match parts.first()? {
                Object::Reference(page_id) => self.page_index.get(page_id).copied(),
                Object::Integer(index) => usize::try_from(*index)
                    .ok()
                    .filter(|i| *i < self.page_index.len()),
                _ => None,
            },
            Object::Name(name) | Object::String(name, _) => {
                self.resolve_dest(self.named_destination(name)?, depth + 1)
            }
            Object::Dictionary(dict) => self.resolve_dest(dict.get(b"D").ok()?, depth + 1),
            _ => None,
        }
    }

    /// Looks `name` up in the catalog's `Dests` dictionary, then in the `Names` tree.
    fn named_destination(&self, name: &[u8]) -> Option<&'a Object> {
        let doc = self.doc;
        if let Ok(dests) = self.catalog.get(b"Dests")
            && let Ok((_, dests)) = doc.dereference(dests)
            && let Ok(dests) = dests.as_dict()
            && let Ok(found) = dests.get(name)
        {
            return Some(found);
        }
        let (_, names) = doc.dereference(self.catalog.get(b"Names").ok()?).ok()?;
        let (_, tree) = doc.dereference(names.as_dict().ok()?.get(b"Dests").ok()?).ok()?;
        self.lookup_name_tree(tree.as_dict().ok()?, name, 0)
    }

    fn lookup_name_tree(&self, node: &'a Dictionary, key: &[u8], depth: usize) -> Option<&'a Object> {
        if depth > MAX_INDIRECTION {
            return None;
        }
        let doc = self.doc;
        if let Ok(names) = node.get(b"Names").and_then(|n| doc.dereference(n))
            && let Ok(names) = names.1.as_array()
        {
            for pair in names.chunks_exact(2) {
                if pair[0].as_str().is_ok_and(|k| k == key) {
                    return Some(&pair[1]);
                }
            }
        }
        let (_, kids) = doc.dereference(node.get(b"Kids").ok()?).ok()?;
        kids.as_array().ok()?.iter().find_map(|kid| {
            let (_, kid) = doc.dereference(kid).ok()?;
            self.lookup_name_tree(kid.as_dict().ok()?, key, depth + 1)
        })
    }
}

/// Replaces the outline with `items`, nesting each item under the closest
/// preceding item with a lower level. An empty list removes the outline.
pub(crate) fn write_outline(doc: &mut Document, items: &[OutlineItem]) -> Result<(), ComposerError> {
    let root_id = catalog_id(doc)?;
    if items.is_empty() {
        let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
        catalog.remove(b"Outlines");
        return Ok(());
    }

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for item in items {
        if item.page >= page_ids.len() {
            return Err(ComposerError::PageOutOfRange {
                index: item.page,
                page_count: page_ids.len(),
            });
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut parents: Vec<Option<usize>> = Vec::with_capacity(items.len());
    let mut roots = Vec::new();
    let mut level_stack: Vec<(u8, usize)> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        while level_stack.last().is_some_and(|&(level, _)| level >= item.level) {
            level_stack.pop();
        }
        match level_stack.last() {
            Some(&(_, parent)) => {
                children[parent].push(i);
                parents.push(Some(parent));
            }
            None => {
                roots.push(i);
                parents.push(None);
            }
        }
        level_stack.push((item.level, i));
    }

    let outline_root_id = doc.new_object_id();
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    let mut dicts: Vec<Dictionary> = items
        .iter()
        .zip(&parents)
        .map(|(item, parent)| {
            let dest = vec![Object::Reference(page_ids[item.page]), "Fit".into()];
            dictionary! {
                "Title" => lopdf::text_string(&item.title),
                "Parent" => parent.map_or(outline_root_id, |p| ids[p]),
                "Dest" => dest,
            }
        })
        .collect();

    let link_siblings = |siblings: &[usize], dicts: &mut [Dictionary]| {
        for (pos, &i) in siblings.iter().enumerate() {
            if pos > 0 {
                dicts[i].set("Prev", ids[siblings[pos - 1]]);
            }
            if let Some(&next) = siblings.get(pos + 1) {
                dicts[i].set("Next", ids[next]);
            }
        }
    };
    link_siblings(&roots, &mut dicts);
    for (i, kids) in children.iter().enumerate() {
        if let (Some(&first), Some(&last)) = (kids.first(), kids.last()) {
            link_siblings(kids, &mut dicts);
            dicts[i].set("First", ids[first]);
            dicts[i].set("Last", ids[last]);
            dicts[i].set("Count", -(kids.len() as i64));
        }
    }

    for (id, dict) in ids.iter().zip(dicts) {
        doc.objects.insert(*id, dict.into());
    }
    // `roots` is never empty: the first item always lands at the top level.
    let first_id = ids[roots[0]];
    let last_id = ids[roots[roots.len() - 1]];
    doc.objects.insert(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines", "First" => first_id, "Last" => last_id, "Count" => roots.len() as i64,
        }
        .into(),
    );

    let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
    catalog.set("Outlines", outline_root_id);
    catalog.set("PageMode", "UseOutlines");
    debug!("Wrote outline with {} items.", items.len());
    Ok(())
}
