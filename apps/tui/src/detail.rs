//! Detail panel content and observation-group selection for a chart node.

use crate::domain::{ClassificationNode, NodePath, Observations};

pub const MISSING_RULE: &str = "未提供";
pub const UNSPECIFIED: &str = "未指定";
pub const EXCEPTION_MARKER: &str = "(*特例)";
pub const VARIES_TEXT: &str = "多樣 (請見 L2 分類)";
pub const NO_TYPES_TEXT: &str = "無特定項目";

/// How the observations field of the panel is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservationDisplay {
    /// One toggle button per observation group.
    Buttons(Vec<&'static str>),
    Text(&'static str),
}

/// Text fields of the detail panel, with placeholders already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub name: &'static str,
    pub rule: &'static str,
    pub system: &'static str,
    pub agency: &'static str,
    pub frequency: &'static str,
    pub note: &'static str,
    pub exception: &'static str,
    pub observations: ObservationDisplay,
}

fn or_placeholder(value: Option<&'static str>, placeholder: &'static str) -> &'static str {
    value.filter(|text| !text.is_empty()).unwrap_or(placeholder)
}

impl DetailPanel {
    pub fn from_node(node: &ClassificationNode) -> Self {
        let observations = match node.observations {
            Observations::Types(types) if !types.is_empty() => {
                ObservationDisplay::Buttons(types.to_vec())
            }
            Observations::Types(_) => ObservationDisplay::Text(NO_TYPES_TEXT),
            Observations::Varies => ObservationDisplay::Text(VARIES_TEXT),
        };

        Self {
            name: node.name,
            rule: or_placeholder(node.rule, MISSING_RULE),
            system: or_placeholder(node.system, UNSPECIFIED),
            agency: or_placeholder(node.agency, UNSPECIFIED),
            frequency: or_placeholder(node.frequency, UNSPECIFIED),
            note: node.note.unwrap_or_default(),
            exception: if node.is_exception { EXCEPTION_MARKER } else { "" },
            observations,
        }
    }

    pub fn buttons(&self) -> &[&'static str] {
        match &self.observations {
            ObservationDisplay::Buttons(buttons) => buttons,
            ObservationDisplay::Text(_) => &[],
        }
    }
}

/// Group pre-selected when a node is chosen: its first concrete observation type.
pub fn default_group(node: &ClassificationNode) -> Option<&'static str> {
    node.observations.types().first().copied()
}

/// The chart node currently selected and the observation group it is filtered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: NodePath,
    pub panel: DetailPanel,
    pub active_group: Option<&'static str>,
}

impl Selection {
    pub fn new(path: NodePath, node: &ClassificationNode) -> Self {
        Self {
            path,
            panel: DetailPanel::from_node(node),
            active_group: default_group(node),
        }
    }

    pub fn category(&self) -> &'static str {
        self.panel.name
    }

    pub fn active_index(&self) -> Option<usize> {
        let active = self.active_group?;
        self.panel.buttons().iter().position(|group| *group == active)
    }

    /// Activate the button at `index`; returns whether the group changed.
    pub fn select_group(&mut self, index: usize) -> bool {
        let Some(group) = self.panel.buttons().get(index).copied() else {
            return false;
        };
        let changed = self.active_group != Some(group);
        self.active_group = Some(group);
        changed
    }

    /// Move the active button by `step`, wrapping around.
    pub fn cycle_group(&mut self, step: isize) -> bool {
        let len = self.panel.buttons().len();
        if len == 0 {
            return false;
        }
        let current = self.active_index().unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len as isize) as usize;
        self.select_group(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{find_by_name, walk};
    use crate::taxonomy::TAXONOMY;

    fn selection_for(name: &str) -> Selection {
        let (path, node) = find_by_name(&TAXONOMY, name).unwrap_or_else(|| panic!("{name}"));
        Selection::new(path, node)
    }

    #[test]
    fn varies_nodes_show_text_and_no_buttons() {
        let selection = selection_for("地面系統測站");
        assert_eq!(selection.panel.observations, ObservationDisplay::Text(VARIES_TEXT));
        assert!(selection.panel.buttons().is_empty());
        assert_eq!(selection.active_group, None);
    }

    #[test]
    fn every_typed_node_renders_one_button_per_type_with_first_active() {
        for (path, node) in walk(&TAXONOMY) {
            let types = node.observations.types();
            if types.is_empty() {
                continue;
            }
            let selection = Selection::new(path, node);
            assert_eq!(selection.panel.buttons().len(), types.len());
            assert_eq!(selection.active_index(), Some(0));
            assert_eq!(selection.active_group, Some(types[0]));
        }
    }

    #[test]
    fn placeholders_fill_missing_fields() {
        let node = ClassificationNode {
            rule: None,
            system: Some(""),
            agency: None,
            frequency: None,
            note: None,
            observations: Observations::Types(&[]),
            ..TAXONOMY[0]
        };
        let panel = DetailPanel::from_node(&node);
        assert_eq!(panel.rule, MISSING_RULE);
        assert_eq!(panel.system, UNSPECIFIED);
        assert_eq!(panel.agency, UNSPECIFIED);
        assert_eq!(panel.frequency, UNSPECIFIED);
        assert_eq!(panel.note, "");
        assert_eq!(panel.observations, ObservationDisplay::Text(NO_TYPES_TEXT));
        assert_eq!(default_group(&node), None);
    }

    #[test]
    fn exception_marker_follows_flag() {
        assert_eq!(selection_for("國道合作站").panel.exception, EXCEPTION_MARKER);
        assert_eq!(selection_for("署屬氣象站").panel.exception, "");
    }

    #[test]
    fn group_selection_and_cycling() {
        let mut selection = selection_for("署屬氣象站");
        assert!(!selection.select_group(0));
        assert!(selection.select_group(1));
        assert_eq!(selection.active_group, Some("溫度、濕度、氣壓"));
        assert!(!selection.select_group(9));
        assert!(selection.cycle_group(1));
        assert_eq!(selection.active_index(), Some(0));
        assert!(selection.cycle_group(-1));
        assert_eq!(selection.active_index(), Some(1));

        let mut varies = selection_for("遙測系統測站");
        assert!(!varies.cycle_group(1));
    }
}
