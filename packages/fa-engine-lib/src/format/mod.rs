use std::path::Path;

use crate::{
    automaton::Automaton,
    format::text::{ToAutomatonFormat, parse_automaton},
};

pub mod text;

impl Automaton {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes an automaton and checks that every referenced vertex
    /// exists.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let automaton: Automaton = serde_json::from_str(json)?;
        automaton.check_references()?;
        Ok(automaton)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        Ok(std::fs::write(path, self.to_json()?)?)
    }

    pub fn to_text_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        Ok(std::fs::write(path, self.to_automaton_format())?)
    }

    /// Loads an automaton, choosing the format by file extension: `.json`
    /// for JSON, `.aut` or `.txt` for the textual format.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let json_str = std::fs::read_to_string(path)?;
                Self::from_json(&json_str)
            }
            Some("aut") | Some("txt") => {
                let text = std::fs::read_to_string(path)?;
                parse_automaton(&text)
            }
            _ => Err(anyhow::anyhow!(
                "Unsupported file extension: {:?}",
                path.extension()
            )),
        }
    }

    fn check_references(&self) -> anyhow::Result<()> {
        if self.vertex(self.start()).is_none() {
            anyhow::bail!("Start vertex {} is not part of the automaton.", self.start());
        }

        for &terminal in self.terminals() {
            if self.vertex(terminal).is_none() {
                anyhow::bail!("Terminal vertex {} is not part of the automaton.", terminal);
            }
        }

        for (id, vertex) in self.vertex_ids().zip(self.vertices()) {
            if id != vertex.id() {
                anyhow::bail!("Vertex stored under id {} claims id {}.", id, vertex.id());
            }

            for (symbol, to) in vertex.iter_edges() {
                if self.vertex(to).is_none() {
                    anyhow::bail!(
                        "Edge {} --{}--> {} leads to a vertex that is not part of the automaton.",
                        id,
                        symbol,
                        to
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::{Alphabet, Automaton};

    #[test]
    fn json_keeps_the_structure() {
        let mut a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        a.add_edge(0, 'a', 1);
        a.add_edge(0, 'a', 2);
        a.add_edge(2, '1', 0);
        a.add_terminal(1);

        let json = a.to_json().unwrap();
        assert_eq!(Automaton::from_json(&json).unwrap(), a);
    }

    #[test]
    fn json_with_dangling_references_is_rejected() {
        let json = r#"{
            "alphabet": "1ab",
            "start": 0,
            "terminals": [4],
            "vertices": { "0": { "id": 0, "transitions": {} } }
        }"#;
        assert!(Automaton::from_json(json).is_err());

        let json = r#"{
            "alphabet": "1aa",
            "start": 0,
            "terminals": [],
            "vertices": { "0": { "id": 0, "transitions": {} } }
        }"#;
        assert!(Automaton::from_json(json).is_err());
    }
}
