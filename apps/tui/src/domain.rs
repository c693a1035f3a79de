use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

/// Sentinel used by the taxonomy when observation types are only known one level down.
pub const VARIES_SENTINEL: &str = "多樣";

/// A 24-bit colour as authored in the taxonomy (`#rrggbb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Blend towards black; `factor` 1.0 keeps the colour, 0.0 is black.
    pub fn scaled(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) * factor).round() as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Hatch pattern drawn over exception categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decal {
    Triangle,
    Rect,
    Star,
}

impl Decal {
    /// Whether the sample at grid position (`col`, `row`) belongs to the pattern.
    pub const fn covers(self, col: usize, row: usize) -> bool {
        match self {
            Self::Triangle => (col + row) % 4 == 0,
            Self::Rect => row % 3 == 0,
            Self::Star => col % 3 == 0 && row % 2 == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub color: Rgb,
    pub decal: Option<Decal>,
}

impl NodeStyle {
    pub const fn plain(color: Rgb) -> Self {
        Self { color, decal: None }
    }

    pub const fn decal(color: Rgb, decal: Decal) -> Self {
        Self {
            color,
            decal: Some(decal),
        }
    }
}

/// Observation types measured by stations of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observations {
    /// Varies per subcategory, see the next level.
    Varies,
    Types(&'static [&'static str]),
}

impl Observations {
    /// Concrete observation types, empty for [`Observations::Varies`].
    pub const fn types(self) -> &'static [&'static str] {
        match self {
            Self::Varies => &[],
            Self::Types(types) => types,
        }
    }

    pub const fn is_varies(self) -> bool {
        matches!(self, Self::Varies)
    }
}

impl Serialize for Observations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let items: &[&str] = match self {
            Self::Varies => &[VARIES_SENTINEL],
            Self::Types(types) => types,
        };
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// One node of the station classification taxonomy.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassificationNode {
    pub name: &'static str,
    pub rule: Option<&'static str>,
    pub system: Option<&'static str>,
    pub agency: Option<&'static str>,
    pub frequency: Option<&'static str>,
    pub observations: Observations,
    pub note: Option<&'static str>,
    pub style: NodeStyle,
    pub is_exception: bool,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub children: &'static [ClassificationNode],
}

impl ClassificationNode {
    pub const fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Angular weight in the sunburst: leaves count 1, parents the sum of their children.
    pub fn leaf_weight(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Self::leaf_weight).sum()
        }
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }
}

/// Index path of a node inside the taxonomy forest, root index first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Zero for domain roots.
    pub fn level(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// True when `self` is `other` or one of its ancestors.
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Resolve a path against a forest.
pub fn find<'a>(forest: &'a [ClassificationNode], path: &NodePath) -> Option<&'a ClassificationNode> {
    let (first, rest) = path.indices().split_first()?;
    let mut node = forest.get(*first)?;
    for index in rest {
        node = node.children.get(*index)?;
    }
    Some(node)
}

/// Pre-order walk of the forest, parents before their children.
pub fn walk(forest: &[ClassificationNode]) -> Vec<(NodePath, &ClassificationNode)> {
    fn visit<'a>(
        node: &'a ClassificationNode,
        path: NodePath,
        out: &mut Vec<(NodePath, &'a ClassificationNode)>,
    ) {
        let children = node.children.iter().enumerate();
        let child_paths: Vec<_> = children.map(|(index, child)| (path.child(index), child)).collect();
        out.push((path, node));
        for (child_path, child) in child_paths {
            visit(child, child_path, out);
        }
    }

    let mut out = Vec::new();
    for (index, root) in forest.iter().enumerate() {
        visit(root, NodePath::root(index), &mut out);
    }
    out
}

/// First node (pre-order) with the given display name.
pub fn find_by_name<'a>(
    forest: &'a [ClassificationNode],
    name: &str,
) -> Option<(NodePath, &'a ClassificationNode)> {
    walk(forest).into_iter().find(|(_, node)| node.name == name)
}
