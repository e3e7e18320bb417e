//! Dependency ordering of generated declarations.
//!
//! Every declaration must appear after the declarations it references. The
//! sorter builds a reference graph with [`petgraph`] and walks it depth first
//! in declaration order, emitting each node once all of its dependencies have
//! been emitted. A back edge during the walk is a cycle and fails the sort.
//!
//! Two entry points exist:
//!
//! - [`sort_declarations`] works on structured [`DeclarationBlock`]s and is
//!   what the builder uses.
//! - [`sort_text`] works on already rendered output, recovering the
//!   declarations and their references from the text.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace, warn};
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::{Control, DfsEvent, depth_first_search},
};
use thiserror::Error;
use winnow::{
    ModalResult, Parser as _,
    ascii::{space0, space1},
    combinator::{preceded, terminated},
    token::take_while,
};

use zodgen_core::declaration::{DeclarationBlock, DeclarationKind};

use crate::emit::render;

/// A reference cycle between declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cyclic dependency detected at {name}")]
pub struct CyclicDependency {
    name: String,
    path: Vec<String>,
}

impl CyclicDependency {
    /// Create a cycle error for `name`, with the cycle as a closed path.
    pub fn new(name: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    /// The declaration at which the cycle was detected.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declarations on the cycle, starting and ending with [`Self::name`].
    pub fn path(&self) -> &[String] {
        &self.path
    }
}

/// Reference graph over a slice of declarations.
///
/// An edge runs from a declaration to each declaration it references.
/// References to names that are not part of the graph are ignored.
#[derive(Debug)]
pub struct DependencyGraph<'b> {
    graph: DiGraph<&'b DeclarationBlock, ()>,
    indices: IndexMap<&'b str, NodeIndex>,
}

impl<'b> DependencyGraph<'b> {
    /// Build the graph for `blocks`.
    ///
    /// When two blocks share a name, references resolve to the first one.
    pub fn build(blocks: &'b [DeclarationBlock]) -> Self {
        let mut graph = DiGraph::with_capacity(blocks.len(), blocks.len());
        let mut indices = IndexMap::with_capacity(blocks.len());

        let nodes: Vec<NodeIndex> = blocks
            .iter()
            .map(|block| {
                let idx = graph.add_node(block);
                indices.entry(block.name()).or_insert(idx);
                idx
            })
            .collect();

        for (block, &from) in blocks.iter().zip(&nodes) {
            // petgraph yields the most recently added edge first, so adding
            // edges in reverse keeps the walk in reference order.
            let targets: Vec<NodeIndex> = block
                .references()
                .filter_map(|reference| indices.get(reference).copied())
                .filter(|&to| to != from)
                .collect();
            for &to in targets.iter().rev() {
                graph.add_edge(from, to, ());
            }
        }

        trace!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Dependency graph built"
        );

        Self { graph, indices }
    }

    /// Names of the declarations `name` depends on, in reference order.
    pub fn dependencies(&self, name: &str) -> Vec<&'b str> {
        self.indices
            .get(name)
            .map(|&idx| {
                self.graph
                    .neighbors(idx)
                    .map(|dep| {
                        let block: &'b DeclarationBlock = self.graph[dep];
                        block.name()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Order the declarations so that every dependency precedes its dependents.
    ///
    /// Declarations are visited in their original order; independent
    /// declarations keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`CyclicDependency`] when the walk reaches a declaration that
    /// is still being visited.
    pub fn topological_order(&self) -> Result<Vec<&'b DeclarationBlock>, CyclicDependency> {
        Ok(self
            .post_order()?
            .into_iter()
            .map(|idx| self.graph[idx])
            .collect())
    }

    /// Depth-first post-order over all nodes, starting from each node in insertion order.
    fn post_order(&self) -> Result<Vec<NodeIndex>, CyclicDependency> {
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut parents: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        let control = depth_first_search(&self.graph, self.graph.node_indices(), |event| {
            match event {
                DfsEvent::TreeEdge(parent, child) => {
                    parents.insert(child, parent);
                }
                DfsEvent::BackEdge(from, to) => return Control::Break((from, to)),
                DfsEvent::Finish(idx, _) => order.push(idx),
                _ => {}
            }
            Control::Continue
        });

        if let Control::Break((from, to)) = control {
            return Err(self.cycle_error(from, to, &parents));
        }

        Ok(order)
    }

    /// Build the error for the back edge `from -> to`.
    fn cycle_error(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        parents: &HashMap<NodeIndex, NodeIndex>,
    ) -> CyclicDependency {
        let mut path = vec![from];
        let mut current = from;
        while current != to {
            match parents.get(&current) {
                Some(&parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        path.reverse();
        path.push(to);

        let name = self.graph[to].name();
        let path = path
            .into_iter()
            .map(|idx| self.graph[idx].name().to_string())
            .collect();
        CyclicDependency::new(name, path)
    }
}

/// Sort declarations so that referenced declarations come first.
///
/// # Errors
///
/// Returns [`CyclicDependency`] if the references form a cycle.
pub fn sort_declarations(
    blocks: Vec<DeclarationBlock>,
) -> Result<Vec<DeclarationBlock>, CyclicDependency> {
    // Nodes are added in slice order, so a node index is a position in `blocks`.
    let order = DependencyGraph::build(&blocks).post_order()?;

    let mut slots: Vec<Option<DeclarationBlock>> = blocks.into_iter().map(Some).collect();
    let sorted: Vec<DeclarationBlock> = order
        .into_iter()
        .filter_map(|idx| slots.get_mut(idx.index()).and_then(Option::take))
        .collect();

    debug!(declarations = sorted.len(); "Declarations sorted");
    Ok(sorted)
}

/// Declarations recovered from rendered text.
#[derive(Debug, Default)]
pub struct SplitDeclarations {
    preamble: String,
    blocks: Vec<DeclarationBlock>,
}

impl SplitDeclarations {
    /// Lines preceding the first declaration, such as the import header.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The declarations in text order.
    pub fn blocks(&self) -> &[DeclarationBlock] {
        &self.blocks
    }

    /// Consume into the preamble and the declarations.
    pub fn into_parts(self) -> (String, Vec<DeclarationBlock>) {
        (self.preamble, self.blocks)
    }
}

/// Parse `export const <Name> =` and return `<Name>`.
fn declaration_header<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    preceded(
        (space0, "export", space1, "const", space1),
        terminated(take_while(1.., is_token_char), (space0, '=')),
    )
    .parse_next(input)
}

/// Return the declared name if `line` opens an `Enum` or `Schema` declaration.
fn declared_name(line: &str) -> Option<&str> {
    let mut input = line;
    let name = declaration_header(&mut input).ok()?;
    DeclarationKind::split_declared_name(name).map(|_| name)
}

/// Returns `true` for characters that may appear in a TypeScript identifier.
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Identifier tokens of `body`, skipping single-quoted string literals.
fn identifier_tokens(body: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut token_start = None;
    let mut in_literal = false;
    let mut escaped = false;

    for (idx, c) in body.char_indices() {
        if in_literal {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '\'' => in_literal = false,
                _ => {}
            }
            continue;
        }

        if is_token_char(c) {
            token_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = token_start.take() {
            tokens.push(&body[start..idx]);
        }
        in_literal = c == '\'';
    }
    if let Some(start) = token_start {
        tokens.push(&body[start..]);
    }
    tokens
}

/// Split rendered output into its preamble and declarations.
///
/// A declaration starts at an `export const <Name>Enum =` or
/// `export const <Name>Schema =` line and runs through the first line that
/// ends in `;`. References are other declared names appearing as whole
/// tokens outside string literals, so `User` never matches inside
/// `UserRole`.
pub fn split_declarations(text: &str) -> SplitDeclarations {
    let mut preamble: Vec<&str> = Vec::new();
    let mut raw: Vec<(&str, String)> = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some((name, mut lines)) = current.take() {
            lines.push(line);
            if line.trim_end().ends_with(';') {
                raw.push((name, lines.join("\n")));
            } else {
                current = Some((name, lines));
            }
            continue;
        }

        match declared_name(line) {
            Some(name) if line.trim_end().ends_with(';') => raw.push((name, line.to_string())),
            Some(name) => current = Some((name, vec![line])),
            None if raw.is_empty() => preamble.push(line),
            None if line.trim().is_empty() => {}
            None => warn!(line = line; "Dropping text outside of any declaration"),
        }
    }
    if let Some((name, lines)) = current {
        debug!(name = name; "Declaration runs to the end of the text");
        raw.push((name, lines.join("\n")));
    }

    let names: IndexSet<&str> = raw.iter().map(|(name, _)| *name).collect();
    let blocks = raw
        .iter()
        .map(|(name, body)| {
            let kind = DeclarationKind::split_declared_name(name)
                .map(|(_, kind)| kind)
                .unwrap_or(DeclarationKind::Schema);
            let references: IndexSet<String> = identifier_tokens(body)
                .into_iter()
                .filter(|token| names.contains(token))
                .map(str::to_string)
                .collect();
            DeclarationBlock::new(*name, kind, body.clone(), references)
        })
        .collect();

    SplitDeclarations {
        preamble: preamble.join("\n").trim_end().to_string(),
        blocks,
    }
}

/// Reorder the declarations of rendered output by dependency.
///
/// The preamble stays at the top; declarations are separated by blank lines.
///
/// # Errors
///
/// Returns [`CyclicDependency`] if the declarations reference each other in
/// a cycle.
pub fn sort_text(text: &str) -> Result<String, CyclicDependency> {
    let (preamble, blocks) = split_declarations(text).into_parts();
    let sorted = sort_declarations(blocks)?;
    Ok(render(&preamble, &sorted))
}
