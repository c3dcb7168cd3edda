//! Plain-text outline of a value stream map, one level per block.

use std::fmt;

use vsm_model::{Node, Vsm};

pub(crate) struct Outline<'a>(&'a Vsm);

pub(crate) fn outline(vsm: &Vsm) -> Outline<'_> {
    Outline(vsm)
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vsm = self.0;
        let kind = if vsm.current().is_pipeline() {
            "pipeline"
        } else {
            "material"
        };
        writeln!(f, "Value stream map for {} '{}'", kind, vsm.current().name())?;

        for (idx, level) in vsm.levels().iter().enumerate() {
            writeln!(f, "Level {}", idx + 1)?;
            if level.is_empty() {
                writeln!(f, "  (no nodes)")?;
            }
            for node in level.nodes() {
                write_node(f, node)?;
            }
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    write!(f, "  [{}] {} ({})", node.node_type(), node.name(), node.id())?;
    if !node.parents().is_empty() {
        write!(f, " <- {}", node.parents().join(", "))?;
    }
    writeln!(f)?;

    for revision in node.material_revisions().unwrap_or_default() {
        for m in revision.modifications() {
            writeln!(
                f,
                "    revision {} by {} ({}): {}",
                m.revision(),
                m.user(),
                m.modified_time(),
                m.comment().lines().next().unwrap_or("")
            )?;
        }
    }

    for instance in node.instances().unwrap_or_default() {
        write!(f, "    run {} (label {})", instance.counter(), instance.label())?;
        let stages: Vec<String> = instance
            .stages()
            .iter()
            .map(|s| format!("{} {} {}s", s.name(), s.status(), s.duration()))
            .collect();
        if !stages.is_empty() {
            write!(f, ": {}", stages.join(", "))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outline_lists_levels_and_history() {
        let vsm = vsm_model::parse_vsm(&json!({
            "current_pipeline": "up42",
            "levels": [
                {"nodes": [{
                    "id": "git-1", "locator": "/m", "name": "repo", "depth": 1,
                    "node_type": "GIT", "parents": [], "dependents": ["up42"],
                    "material_revisions": [{"modifications": [{
                        "modified_time": "2 hours ago", "locator": "/m/r1",
                        "revision": "r1", "comment": "fix build\nmore detail", "user": "bob"
                    }]}]
                }]},
                {"nodes": []},
                {"nodes": [{
                    "id": "up42", "locator": "/p", "name": "up42", "depth": 3,
                    "node_type": "PIPELINE", "parents": ["git-1"], "dependents": [],
                    "instances": [{"label": "1", "locator": "/p/1", "counter": 1, "stages": [
                        {"locator": "/s", "name": "build", "duration": 10, "status": "Passed"}
                    ]}]
                }]}
            ]
        }))
        .unwrap();

        let text = outline(&vsm).to_string();
        assert_eq!(
            text,
            "Value stream map for pipeline 'up42'\n\
             Level 1\n\
             \x20 [GIT] repo (git-1)\n\
             \x20   revision r1 by bob (2 hours ago): fix build\n\
             Level 2\n\
             \x20 (no nodes)\n\
             Level 3\n\
             \x20 [PIPELINE] up42 (up42) <- git-1\n\
             \x20   run 1 (label 1): build Passed 10s\n"
        );
    }
}
