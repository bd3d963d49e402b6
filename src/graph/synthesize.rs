// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{
    split_compound, CatalogDocument, Course, CourseRole, EdgeStyle, GraphEdge, GraphNode,
    Junction, NodeId, Prereq, PrereqGraph, PrereqGroup,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// The selected course has an empty code, so it cannot be given a node id.
    EmptyCourseCode { course_id: String },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCourseCode { course_id } => {
                write!(f, "course {course_id:?} has an empty code and cannot be graphed")
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

/// Hands out junction node ids (`or#0`, `and#0`, ...).
///
/// Scoped to a single synthesis call, so ids restart at zero for every selection.
/// Reserved ids are skipped.
#[derive(Debug, Default)]
pub struct JunctionIds {
    next_or: usize,
    next_and: usize,
    reserved: BTreeSet<String>,
}

impl JunctionIds {
    /// A generator that never returns one of `codes`.
    pub fn reserving<'c>(codes: impl IntoIterator<Item = &'c str>) -> Self {
        Self {
            reserved: codes.into_iter().map(str::to_owned).collect(),
            ..Self::default()
        }
    }

    pub fn next(&mut self, junction: Junction) -> NodeId {
        let counter = match junction {
            Junction::Or => &mut self.next_or,
            Junction::And => &mut self.next_and,
        };
        loop {
            let node_id = NodeId::junction(junction.id_prefix(), *counter);
            *counter += 1;
            if !self.reserved.contains(node_id.as_str()) {
                return node_id;
            }
        }
    }
}

/// Every course code the neighborhood of `course` can produce a node for.
fn neighborhood_codes<'a>(course: &'a Course, document: &'a CatalogDocument) -> Vec<&'a str> {
    let mut codes = vec![course.code()];
    if let Some(prereq) = course.prerequisites() {
        codes.extend(prereq.codes().into_iter().flat_map(split_compound));
    }
    codes.extend(document.unlocked_by(course.code()).iter().map(String::as_str));
    codes
}

/// Builds the two-hop neighborhood of `course`.
///
/// The graph holds the selected course, its direct prerequisites (with AND/OR junction
/// nodes where the expression needs them) and every course it directly unlocks according
/// to the document's reverse index. Codes missing from the catalog still get a node
/// labelled with the raw code.
pub fn synthesize_graph(
    course: &Course,
    document: &CatalogDocument,
) -> Result<PrereqGraph, SynthesisError> {
    let selected = NodeId::new(course.code())
        .map_err(|_| SynthesisError::EmptyCourseCode { course_id: course.id().to_owned() })?;

    let junctions = JunctionIds::reserving(neighborhood_codes(course, document));
    let mut builder = GraphBuilder::new(document, junctions);
    let mut node = GraphNode::course(selected.clone(), CourseRole::Selected);
    node.set_title((!course.title().is_empty()).then(|| course.title()));
    builder.graph.insert_node(node);

    if let Some(prereq) = course.prerequisites() {
        for final_node in builder.expand(prereq) {
            builder.edge(final_node, selected.clone(), EdgeStyle::Solid);
        }
    }

    for code in document.unlocked_by(course.code()) {
        if let Some(output) = builder.course_node(code, CourseRole::Unlocks) {
            builder.edge(selected.clone(), output, EdgeStyle::Solid);
        }
    }

    let graph = builder.graph;
    tracing::debug!(
        course = course.code(),
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "synthesized prerequisite graph"
    );
    Ok(graph)
}

struct GraphBuilder<'a> {
    document: &'a CatalogDocument,
    graph: PrereqGraph,
    junctions: JunctionIds,
}

impl<'a> GraphBuilder<'a> {
    fn new(document: &'a CatalogDocument, junctions: JunctionIds) -> Self {
        Self {
            document,
            graph: PrereqGraph::default(),
            junctions,
        }
    }

    /// Expands an expression and returns the nodes that feed the selected course directly.
    fn expand(&mut self, prereq: &Prereq) -> Vec<NodeId> {
        match prereq {
            Prereq::Simple { courses } | Prereq::And { courses } => self.direct(courses),
            Prereq::Or { courses } => self.alternatives(courses),
            Prereq::Complex { groups } => {
                let mut finals = Vec::new();
                for group in groups {
                    let nodes = match group {
                        PrereqGroup::Simple { courses } => self.direct(courses),
                        PrereqGroup::Or { courses } => self.alternatives(courses),
                    };
                    finals.extend(nodes);
                }
                finals
            }
        }
    }

    /// Every code of every entry is a prerequisite on its own.
    fn direct(&mut self, entries: &[String]) -> Vec<NodeId> {
        entries
            .iter()
            .flat_map(|entry| split_compound(entry))
            .filter_map(|code| self.course_node(code, CourseRole::Prerequisite))
            .collect()
    }

    /// A disjunction: one OR junction fed by each alternative.
    ///
    /// Compound alternatives get their own AND junction. With a single alternative no
    /// junction is created and its codes become direct prerequisites.
    fn alternatives(&mut self, entries: &[String]) -> Vec<NodeId> {
        let alternatives = entries
            .iter()
            .map(|entry| split_compound(entry))
            .filter(|codes| !codes.is_empty())
            .collect::<Vec<_>>();

        match alternatives.as_slice() {
            [] => Vec::new(),
            [only] => only
                .iter()
                .filter_map(|code| self.course_node(code, CourseRole::Prerequisite))
                .collect(),
            _ => {
                let or = self.junction(Junction::Or);
                for codes in &alternatives {
                    if let [code] = codes.as_slice() {
                        if let Some(node) = self.course_node(code, CourseRole::Prerequisite) {
                            self.edge(node, or.clone(), EdgeStyle::Dashed);
                        }
                        continue;
                    }

                    let and = self.junction(Junction::And);
                    for code in codes {
                        if let Some(node) = self.course_node(code, CourseRole::Prerequisite) {
                            self.edge(node, and.clone(), EdgeStyle::Solid);
                        }
                    }
                    self.edge(and, or.clone(), EdgeStyle::Dashed);
                }
                vec![or]
            }
        }
    }

    /// Returns the node for `code`, creating it on first use.
    ///
    /// The first role a course is seen in wins; later mentions reuse the node.
    fn course_node(&mut self, code: &str, role: CourseRole) -> Option<NodeId> {
        let Ok(node_id) = NodeId::new(code) else {
            tracing::debug!(role = ?role, "skipping empty course code");
            return None;
        };
        if !self.graph.contains_node(&node_id) {
            let mut node = GraphNode::course(node_id.clone(), role);
            let title = self.document.find_course(code).map(Course::title);
            node.set_title(title.filter(|title| !title.is_empty()));
            self.graph.insert_node(node);
        }
        Some(node_id)
    }

    fn junction(&mut self, junction: Junction) -> NodeId {
        let node_id = self.junctions.next(junction);
        self.graph.insert_node(GraphNode::junction(node_id.clone(), junction));
        node_id
    }

    fn edge(&mut self, source: NodeId, target: NodeId, style: EdgeStyle) {
        self.graph.insert_edge(GraphEdge::new(source, target, style));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::{fixture, rstest};

    use super::{synthesize_graph, JunctionIds, SynthesisError};
    use crate::model::fixtures;
    use crate::model::{
        CatalogDocument, Course, CourseRole, EdgeStyle, Junction, NodeKind, Prereq, PrereqGraph,
        PrereqGroup, ReversePrereqIndex,
    };

    #[fixture]
    fn document() -> CatalogDocument {
        fixtures::document()
    }

    fn strings(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|code| (*code).to_owned()).collect()
    }

    fn node_ids(graph: &PrereqGraph) -> Vec<&str> {
        graph.nodes().iter().map(|node| node.id().as_str()).collect()
    }

    fn edges(graph: &PrereqGraph) -> Vec<(&str, &str, EdgeStyle)> {
        graph
            .edges()
            .iter()
            .map(|edge| (edge.source().as_str(), edge.target().as_str(), edge.style()))
            .collect()
    }

    fn kind_of(graph: &PrereqGraph, id: &str) -> NodeKind {
        let node = graph.nodes().iter().find(|node| node.id().as_str() == id).expect("node");
        *node.kind()
    }

    fn graph_for(prereq: Prereq, document: &CatalogDocument) -> PrereqGraph {
        let course = Course::new("t", "TARGET").with_prerequisites(Some(prereq));
        synthesize_graph(&course, document).expect("synthesize")
    }

    #[rstest]
    fn or_with_compound_alternative_gets_and_junction(document: CatalogDocument) {
        let course = document.find_course("CS200").expect("CS200");
        let graph = synthesize_graph(course, &document).expect("synthesize");

        assert_eq!(
            node_ids(&graph),
            vec!["CS200", "or#0", "CS101", "and#0", "CS102", "CS103", "CS210", "CS300"]
        );
        assert_eq!(
            edges(&graph),
            vec![
                ("CS101", "or#0", EdgeStyle::Dashed),
                ("CS102", "and#0", EdgeStyle::Solid),
                ("CS103", "and#0", EdgeStyle::Solid),
                ("and#0", "or#0", EdgeStyle::Dashed),
                ("or#0", "CS200", EdgeStyle::Solid),
                ("CS200", "CS210", EdgeStyle::Solid),
                ("CS200", "CS300", EdgeStyle::Solid),
            ]
        );
        assert_eq!(kind_of(&graph, "CS200"), NodeKind::Course { role: CourseRole::Selected });
        assert_eq!(kind_of(&graph, "or#0"), NodeKind::Or);
        assert_eq!(kind_of(&graph, "and#0"), NodeKind::And);
        assert_eq!(kind_of(&graph, "CS300"), NodeKind::Course { role: CourseRole::Unlocks });
    }

    #[rstest]
    fn course_without_neighbors_is_a_single_node(document: CatalogDocument) {
        let course = Course::new("99", "LONE101");
        let graph = synthesize_graph(&course, &document).expect("synthesize");

        assert_eq!(node_ids(&graph), vec!["LONE101"]);
        assert!(graph.edges().is_empty());
    }

    #[rstest]
    fn simple_and_and_feed_the_course_directly(document: CatalogDocument) {
        let graph = graph_for(Prereq::simple("CS101"), &document);
        assert_eq!(edges(&graph), vec![("CS101", "TARGET", EdgeStyle::Solid)]);

        let and = Prereq::And {
            courses: strings(&["CS101", "CS102, CS103"]),
        };
        let graph = graph_for(and, &document);
        assert_eq!(node_ids(&graph), vec!["TARGET", "CS101", "CS102", "CS103"]);
        assert_eq!(
            edges(&graph),
            vec![
                ("CS101", "TARGET", EdgeStyle::Solid),
                ("CS102", "TARGET", EdgeStyle::Solid),
                ("CS103", "TARGET", EdgeStyle::Solid),
            ]
        );
    }

    #[rstest]
    fn single_alternative_or_needs_no_junction(document: CatalogDocument) {
        let graph = graph_for(Prereq::Or { courses: strings(&["CS102, CS103"]) }, &document);
        assert_eq!(node_ids(&graph), vec!["TARGET", "CS102", "CS103"]);
        assert!(graph.nodes().iter().all(|node| !node.is_junction()));
    }

    #[rstest]
    fn shared_course_in_two_or_groups_gets_one_node_and_two_edges(document: CatalogDocument) {
        let prereq = Prereq::Complex {
            groups: vec![
                PrereqGroup::Or { courses: strings(&["A", "B"]) },
                PrereqGroup::Or { courses: strings(&["B", "C"]) },
                PrereqGroup::Simple { courses: strings(&["B"]) },
            ],
        };
        let graph = graph_for(prereq, &document);

        let ids = node_ids(&graph);
        let unique = ids.iter().collect::<BTreeSet<_>>();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids, vec!["TARGET", "or#0", "A", "B", "or#1", "C"]);
        assert_eq!(
            edges(&graph),
            vec![
                ("A", "or#0", EdgeStyle::Dashed),
                ("B", "or#0", EdgeStyle::Dashed),
                ("B", "or#1", EdgeStyle::Dashed),
                ("C", "or#1", EdgeStyle::Dashed),
                ("or#0", "TARGET", EdgeStyle::Solid),
                ("or#1", "TARGET", EdgeStyle::Solid),
                ("B", "TARGET", EdgeStyle::Solid),
            ]
        );
    }

    #[rstest]
    fn complex_expansion_matches_catalog(document: CatalogDocument) {
        let course = document.find_course("CS300").expect("CS300");
        let graph = synthesize_graph(course, &document).expect("synthesize");

        assert_eq!(
            node_ids(&graph),
            vec!["CS300", "or#0", "CS200", "CS210", "or#1", "CS102", "MATH 20"]
        );
        assert!(edges(&graph).contains(&("CS200", "CS300", EdgeStyle::Solid)));
        assert!(edges(&graph).contains(&("CS200", "or#0", EdgeStyle::Dashed)));
        let titled = graph.nodes().iter().find(|n| n.id().as_str() == "CS210").expect("CS210");
        assert_eq!(titled.title(), Some("Systems Programming"));
    }

    #[rstest]
    fn dangling_codes_still_get_nodes(document: CatalogDocument) {
        let course = document.find_course("CS310").expect("CS310");
        let graph = synthesize_graph(course, &document).expect("synthesize");

        let dangling = graph.nodes().iter().find(|n| n.id().as_str() == "PHYS 7A").expect("node");
        assert_eq!(dangling.label(), "PHYS 7A");
        assert_eq!(dangling.title(), None);
        assert_eq!(edges(&graph), vec![("PHYS 7A", "CS310", EdgeStyle::Solid)]);
    }

    #[rstest]
    fn course_that_is_both_prerequisite_and_output_keeps_one_node() {
        let mut reverse = ReversePrereqIndex::default();
        reverse.push("A", "B");
        reverse.push("B", "A");
        let a = Course::new("1", "A").with_prerequisites(Some(Prereq::simple("B")));
        let b = Course::new("2", "B").with_prerequisites(Some(Prereq::simple("A")));
        let document = CatalogDocument::new(vec![a.clone(), b], reverse);

        let graph = synthesize_graph(&a, &document).expect("synthesize");
        assert_eq!(node_ids(&graph), vec!["A", "B"]);
        assert_eq!(kind_of(&graph, "B"), NodeKind::Course { role: CourseRole::Prerequisite });
        assert_eq!(
            edges(&graph),
            vec![("B", "A", EdgeStyle::Solid), ("A", "B", EdgeStyle::Solid)]
        );
    }

    #[rstest]
    fn synthesis_is_deterministic(document: CatalogDocument) {
        for course in document.courses() {
            let first = synthesize_graph(course, &document).expect("synthesize");
            let second = synthesize_graph(course, &document).expect("synthesize");
            assert_eq!(node_ids(&first), node_ids(&second));
            assert_eq!(edges(&first), edges(&second));
        }
    }

    #[test]
    fn empty_course_code_is_rejected() {
        let course = Course::new("7", "");
        assert_eq!(
            synthesize_graph(&course, &CatalogDocument::default()),
            Err(SynthesisError::EmptyCourseCode { course_id: "7".to_owned() })
        );
    }

    #[test]
    fn junction_ids_count_per_kind() {
        let mut ids = JunctionIds::default();
        assert_eq!(ids.next(Junction::Or).as_str(), "or#0");
        assert_eq!(ids.next(Junction::And).as_str(), "and#0");
        assert_eq!(ids.next(Junction::Or).as_str(), "or#1");
    }

    #[test]
    fn junction_ids_skip_reserved_codes() {
        let mut ids = JunctionIds::reserving(["or#0", "or#1", "and#1"]);
        assert_eq!(ids.next(Junction::Or).as_str(), "or#2");
        assert_eq!(ids.next(Junction::And).as_str(), "and#0");
        assert_eq!(ids.next(Junction::And).as_str(), "and#2");
    }

    #[rstest]
    fn course_code_spelled_like_a_junction_keeps_its_own_node(document: CatalogDocument) {
        let graph = graph_for(Prereq::Or { courses: strings(&["or#0", "B"]) }, &document);

        assert_eq!(node_ids(&graph), vec!["TARGET", "or#1", "or#0", "B"]);
        assert_eq!(kind_of(&graph, "or#1"), NodeKind::Or);
        assert_eq!(kind_of(&graph, "or#0"), NodeKind::Course { role: CourseRole::Prerequisite });
        assert_eq!(
            edges(&graph),
            vec![
                ("or#0", "or#1", EdgeStyle::Dashed),
                ("B", "or#1", EdgeStyle::Dashed),
                ("or#1", "TARGET", EdgeStyle::Solid),
            ]
        );
    }
}
