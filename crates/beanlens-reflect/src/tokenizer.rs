/// One segment of a property path such as `orders[0].items.name`.
///
/// `name` drops any index (`orders`), `indexed_name` keeps it (`orders[0]`), and `children` is
/// the rest of the path after the first `.`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyTokenizer<'a> {
    name: &'a str,
    indexed_name: &'a str,
    index: Option<&'a str>,
    children: Option<&'a str>,
}

impl<'a> PropertyTokenizer<'a> {
    pub fn new(full_name: &'a str) -> Self {
        let (indexed_name, children) = match full_name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (full_name, None),
        };
        let (name, index) = match indexed_name.split_once('[') {
            Some((name, rest)) => (name, Some(rest.strip_suffix(']').unwrap_or(rest))),
            None => (indexed_name, None),
        };
        Self {
            name,
            indexed_name,
            index,
            children,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn indexed_name(&self) -> &'a str {
        self.indexed_name
    }

    pub fn index(&self) -> Option<&'a str> {
        self.index
    }

    pub fn children(&self) -> Option<&'a str> {
        self.children
    }

    pub fn has_next(&self) -> bool {
        self.children.is_some()
    }

    /// Tokenizer for the remainder of the path.
    pub fn next_segment(&self) -> Option<PropertyTokenizer<'a>> {
        self.children.map(PropertyTokenizer::new)
    }
}

impl<'a> IntoIterator for PropertyTokenizer<'a> {
    type Item = PropertyTokenizer<'a>;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Segments<'a> {
        Segments { next: Some(self) }
    }
}

/// Iterator over the segments of a path, starting with the segment it was created from.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    next: Option<PropertyTokenizer<'a>>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = PropertyTokenizer<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next_segment();
        Some(current)
    }
}
