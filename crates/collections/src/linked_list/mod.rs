use crate::macros::boxnode;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A singly-linked chain of key/value nodes.
///
/// Keys are compared by their bytes (`K: AsRef<[u8]>`) and are unique
/// within one list. New keys go to the tail, so iteration follows
/// first-insertion order.
pub struct List<K, V> {
    head: Link<K, V>,
    len: usize,
}

/// What [`List::upsert`] did with the pair it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    /// The key was new and got a node at the tail
    Appended,
    /// The key was already there, its value now holds the resolver's result
    Merged,
}

impl<K, V> List<K, V> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Detaches the first node and hands back its key and value
    #[inline]
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            self.len -= 1;
            node.into_pair()
        })
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    // [private]

    /// Returns the link at position `pos`,
    /// or the empty tail link if the list is shorter than that
    fn link_at(&mut self, pos: usize) -> &mut Link<K, V> {
        let mut link = &mut self.head;
        for _ in 0..pos {
            if let Some(node) = link {
                link = &mut node.next;
            }
        }
        link
    }

    /// Splices `node` in so that it ends up at position `pos`
    fn link_node(&mut self, pos: usize, mut node: Box<Node<K, V>>) {
        let link = self.link_at(pos);
        node.next = link.take();
        *link = Some(node);
        self.len += 1;
    }
}

impl<K: AsRef<[u8]>, V> List<K, V> {
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.iter().find(|node| node.matches(key)).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let mut current = self.head.as_deref_mut();
        while let Some(node) = current {
            if node.matches(key) {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Appends `key`/`value` at the tail if `key` is not in the list,
    /// otherwise replaces the stored value with `resolve(old, value)`.
    ///
    /// On a merge the stored key is kept and `key` is dropped.
    /// The merged node keeps its position in the list.
    ///
    /// # Panics
    ///
    /// A panic inside `resolve` is propagated.
    /// The node being merged is lost, the rest of the list stays linked.
    pub fn upsert<F>(&mut self, key: K, value: V, resolve: F) -> Inserted
    where
        F: FnOnce(V, V) -> V,
    {
        match self.unlink(key.as_ref()) {
            Some((pos, node)) => {
                let (stored, old) = node.into_pair();
                self.link_node(pos, boxnode!(stored, resolve(old, value)));
                Inserted::Merged
            }
            None => {
                let tail = self.len;
                self.link_node(tail, boxnode!(key, value));
                Inserted::Appended
            }
        }
    }

    /// Unlinks the node holding `key`, returning its key and value
    pub fn remove(&mut self, key: &[u8]) -> Option<(K, V)> {
        self.unlink(key).map(|(_, node)| node.into_pair())
    }

    // [private]

    /// Takes the node holding `key` out of the list,
    /// together with the position it was taken from
    fn unlink(&mut self, key: &[u8]) -> Option<(usize, Box<Node<K, V>>)> {
        let mut pos = 0;
        let mut link = &mut self.head;
        while link.as_deref().is_some_and(|node| !node.matches(key)) {
            if let Some(node) = link {
                link = &mut node.next;
            }
            pos += 1;
        }

        let mut node = link.take()?;
        *link = node.next.take();
        self.len -= 1;
        Some((pos, node))
    }
}

impl<K, V> Default for List<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for List<K, V> {
    fn drop(&mut self) {
        let mut curr = self.head.take();
        while let Some(mut node) = curr {
            curr = node.next.take();
            // node goes out of scope here, calling drop
        }
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for List<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a List<K, V> {
    type Item = &'a Node<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for List<K, V> {
    type Item = <IntoIter<K, V> as Iterator>::Item;
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) next: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    fn into_pair(self: Box<Self>) -> (K, V) {
        let Node { key, value, .. } = *self;
        (key, value)
    }
}

impl<K: AsRef<[u8]>, V> Node<K, V> {
    /// Byte-wise equality over the full length of both keys
    #[inline]
    pub(crate) fn matches(&self, key: &[u8]) -> bool {
        self.key.as_ref() == key
    }
}

impl<K: AsRef<[u8]>, V: PartialEq> PartialEq for Node<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key.as_ref() == other.key.as_ref() && self.value == other.value
    }
}
impl<K: AsRef<[u8]>, V: Eq> Eq for Node<K, V> {}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{:?}, {:?}>", self.key, self.value)
    }
}

// [iterators]

#[derive(Debug)]
pub struct Iter<'a, K, V> {
    current: Option<&'a Node<K, V>>,
    len: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.take().map(|node| {
            self.current = node.next.as_deref();
            self.len -= 1;
            node
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(list: &'a List<K, V>) -> Self {
        Self {
            current: list.head.as_deref(),
            len: list.len,
        }
    }
}

pub struct IntoIter<K, V>(List<K, V>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}
