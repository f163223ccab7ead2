use super::{warning_result::WarningResult, InstanceReader, WarningHandler};
use crate::graph::{NodeId, Observation, Profile};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};

lazy_static! {
    static ref ASSIGNMENT_PATTERN: Regex = Regex::new(r"^\s*([^=]*[^=\s])\s*=\s*(\S+)\s*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileValue {
    Observation(Observation),
    Input,
    Min,
    Max,
}

const VALUES: [(&str, ProfileValue); 11] = [
    ("0", ProfileValue::Observation(Observation::Zero)),
    ("nc", ProfileValue::Observation(Observation::Zero)),
    ("1", ProfileValue::Observation(Observation::Plus)),
    ("+", ProfileValue::Observation(Observation::Plus)),
    ("-1", ProfileValue::Observation(Observation::Minus)),
    ("-", ProfileValue::Observation(Observation::Minus)),
    ("notPlus", ProfileValue::Observation(Observation::NotPlus)),
    ("notMinus", ProfileValue::Observation(Observation::NotMinus)),
    ("input", ProfileValue::Input),
    ("MIN", ProfileValue::Min),
    ("MAX", ProfileValue::Max),
];

// network node names never contain whitespace
fn captured_node(c: &Captures, i: usize) -> Result<NodeId> {
    let name = c.get(i).unwrap().as_str();
    if name.contains(char::is_whitespace) {
        Err(anyhow!(r#"invalid node name "{}": names cannot contain spaces"#, name))
    } else {
        Ok(NodeId::or(name))
    }
}

fn captured_value(c: &Captures, i: usize) -> Result<WarningResult<ProfileValue, String>> {
    let value = c.get(i).unwrap().as_str();
    if let Some((_, v)) = VALUES.iter().find(|(s, _)| *s == value) {
        return Ok(WarningResult::Ok(*v));
    }
    match VALUES.iter().find(|(s, _)| s.eq_ignore_ascii_case(value)) {
        Some((s, v)) => Ok(WarningResult::Warned(
            *v,
            vec![format!(r#"value "{}" read as "{}""#, value, s)],
        )),
        None => Err(anyhow!(r#"unknown value "{}""#, value)),
    }
}

fn try_read_assignment<T>(l: T) -> Result<WarningResult<(NodeId, ProfileValue), String>>
where
    T: AsRef<str>,
{
    match ASSIGNMENT_PATTERN.captures(l.as_ref()) {
        Some(c) => {
            let node = captured_node(&c, 1)?;
            Ok(captured_value(&c, 2)?.map(|v| (node, v)))
        }
        None => Err(anyhow!("expected an assignment \"node = value\"")),
    }
}

/// A reader for observation profiles.
///
/// Each line assigns a value to a node: a variation (`+`, `-`, `0`, `notPlus`, `notMinus`),
/// the fact the node is an input of the experiment (`input`),
/// or the fact the node is at its minimal (`MIN`) or maximal (`MAX`) level.
/// Variations may also be written `1`, `-1` and `nc`.
/// Empty lines are ignored; malformed lines are skipped after a warning is raised.
///
/// Contradictory assignments are kept, since they are detected afterwards by the query engine.
///
/// ```text
/// A = input
/// A = +
/// B = -1
/// C = notPlus
/// D = MAX
/// ```
///
/// # Example
///
/// ```
/// # use iggy::graph::Profile;
/// # use iggy::io::{InstanceReader, ProfileReader};
/// fn read_profile_from_str(s: &str) -> Profile {
///     let reader = ProfileReader::new("my_profile");
///     reader.read(&mut s.as_bytes()).expect("cannot read the profile")
/// }
/// assert_eq!(1, read_profile_from_str("A = +").observations().count());
/// ```
pub struct ProfileReader {
    name: String,
    warning_handlers: Vec<WarningHandler>,
}

impl ProfileReader {
    /// Builds a reader for profiles with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            warning_handlers: vec![],
        }
    }
}

impl InstanceReader<Profile> for ProfileReader {
    fn read(&self, reader: &mut dyn Read) -> Result<Profile> {
        let mut profile = Profile::new(&self.name);
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let warning_consumer = |warnings: Vec<String>| {
                for w in warnings.iter() {
                    self.warning_handlers
                        .iter()
                        .for_each(|h| (h)(1 + i, w.to_string()));
                }
            };
            let l = line.with_context(context)?;
            if l.trim().is_empty() {
                continue;
            }
            let (node, value) = match try_read_assignment(&l) {
                Ok(r) => r.consume_warnings(warning_consumer),
                Err(e) => {
                    warning_consumer(vec![format!(r#"skipping "{}": {}"#, l.trim(), e)]);
                    continue;
                }
            };
            match value {
                ProfileValue::Observation(o) => profile.add_observation(node, o),
                ProfileValue::Input => profile.add_input(node),
                ProfileValue::Min => profile.add_min(node),
                ProfileValue::Max => profile.add_max(node),
            }
        }
        Ok(profile)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Fact, Observation};
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_assignment_pattern() {
        assert!(ASSIGNMENT_PATTERN.is_match("A = +"));
        assert!(ASSIGNMENT_PATTERN.is_match("  A=-1  "));
        assert!(ASSIGNMENT_PATTERN.is_match("IL-6 = notPlus"));
        assert!(!ASSIGNMENT_PATTERN.is_match("A +"));
        assert!(!ASSIGNMENT_PATTERN.is_match("= +"));
        assert!(!ASSIGNMENT_PATTERN.is_match("A = + -"));
    }

    #[test]
    fn test_try_read_assignment_ok() {
        let assert_assignment = |name: &str, value, line| {
            assert_eq!(
                (NodeId::or(name), value),
                try_read_assignment(line)
                    .unwrap()
                    .consume_warnings(|_| panic!())
            );
        };
        assert_assignment("A", ProfileValue::Observation(Observation::Plus), "A = +");
        assert_assignment("A", ProfileValue::Observation(Observation::Plus), "A = 1");
        assert_assignment("A", ProfileValue::Observation(Observation::Zero), "A = nc");
        assert_assignment("B", ProfileValue::Observation(Observation::Minus), "B=-");
        assert_assignment(
            "C",
            ProfileValue::Observation(Observation::NotMinus),
            "C = notMinus",
        );
        assert_assignment("D", ProfileValue::Input, "D = input");
        assert_assignment("E", ProfileValue::Min, "E = MIN");
        assert_assignment("E", ProfileValue::Max, "E = MAX");
    }

    #[test]
    fn test_try_read_assignment_warned() {
        let mut warnings = vec![];
        let assignment = try_read_assignment("A = notplus")
            .unwrap()
            .consume_warnings(|w| warnings = w);
        assert_eq!(
            (NodeId::or("A"), ProfileValue::Observation(Observation::NotPlus)),
            assignment
        );
        assert_eq!(1, warnings.len());
    }

    #[test]
    fn test_try_read_assignment_name_with_spaces() {
        assert!(try_read_assignment("my node = +").is_err());
        assert!(try_read_assignment("my\tnode = +").is_err());
    }

    #[test]
    fn test_try_read_assignment_unknown_value() {
        assert!(try_read_assignment("A = up").is_err());
        assert!(try_read_assignment("A up").is_err());
    }

    #[test]
    fn test_read() {
        let warnings = Rc::new(RefCell::new(vec![]));
        let mut reader = ProfileReader::new("p");
        let handler_warnings = Rc::clone(&warnings);
        reader.add_warning_handler(Box::new(move |i, w| {
            handler_warnings.borrow_mut().push((i, w))
        }));
        let profile = reader
            .read(&mut "A = input\n\nA = +\nB = up\nC = MIN\nX = +\nX = -\nmy node = 0\n".as_bytes())
            .unwrap();
        assert_eq!(2, warnings.borrow().len());
        assert_eq!(4, warnings.borrow()[0].0);
        assert_eq!(8, warnings.borrow()[1].0);
        let facts = profile.to_facts();
        assert!(facts.contains(&Fact::ProfileInput("p".to_string(), NodeId::or("A"))));
        assert!(facts.contains(&Fact::IsMin("p".to_string(), NodeId::or("C"))));
        assert!(facts.contains(&Fact::ObsVLabel(
            "p".to_string(),
            NodeId::or("X"),
            Observation::Minus
        )));
        assert_eq!(3, profile.observations().count());
    }
}
