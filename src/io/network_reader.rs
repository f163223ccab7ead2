use super::{warning_result::WarningResult, InstanceReader, WarningHandler};
use crate::graph::{EdgeSign, Network, NodeId};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// A parsed expression, before nodes are built.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    Node(String),
    Group(Vec<Literal>),
    Function(String, Vec<String>),
}

type Literal = (Option<EdgeSign>, Expr);

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedStatement {
    Chain(Expr, Vec<(Option<EdgeSign>, Expr)>),
    Arrow(Vec<Literal>, String),
}

peg::parser! { grammar network_grammar() for str {

    rule ws() = quiet!{[' ' | '\t']}

    rule _() = ws()*

    rule name() -> &'input str
        = $((!"->" [c if c.is_alphanumeric() || "_:[]/.'+-".contains(c)])+)

    rule sign() -> Option<EdgeSign>
        = "-1" { Some(EdgeSign::Minus) }
        / "1" { Some(EdgeSign::Plus) }
        / "+" { Some(EdgeSign::Plus) }
        / "-" { Some(EdgeSign::Minus) }
        / "?" { None }

    rule literal() -> Literal
        = "!" _ e:expr() { (Some(EdgeSign::Minus), e) }
        / "?" _ e:expr() { (None, e) }
        / e:expr() { (Some(EdgeSign::Plus), e) }

    rule conjunction() -> Vec<Literal>
        = l:(literal() ++ (_ "&" _)) { l }

    rule expr() -> Expr
        = "(" _ l:conjunction() _ ")" { Expr::Group(l) }
        / f:name() "(" _ args:(name() ++ (_ "," _)) _ ")" {
            Expr::Function(f.to_string(), args.iter().map(|a| a.to_string()).collect())
        }
        / n:name() { Expr::Node(n.to_string()) }

    rule arrow() -> ParsedStatement
        = l:conjunction() _ "->" _ t:name() { ParsedStatement::Arrow(l, t.to_string()) }

    rule chain() -> ParsedStatement
        = first:expr() rest:(ws()+ s:sign() ws()+ e:expr() { (s, e) })* {
            ParsedStatement::Chain(first, rest)
        }

    pub rule statement() -> ParsedStatement
        = _ s:(arrow() / chain()) _ { s }
}}

/// The content of a single statement, applied to the network only if the whole statement is valid.
#[derive(Debug, Default, PartialEq, Eq)]
struct Statement {
    edges: Vec<(NodeId, NodeId, Option<EdgeSign>)>,
    inputs: Vec<NodeId>,
}

impl Statement {
    fn parse(line: &str) -> Result<Statement> {
        let parsed = network_grammar::statement(line)?;
        let mut statement = Statement::default();
        match parsed {
            ParsedStatement::Chain(first, rest) => statement.add_chain(first, rest)?,
            ParsedStatement::Arrow(literals, target) => statement.add_arrow(literals, target)?,
        }
        Ok(statement)
    }

    // `A 1 B -1 C ? D`, or a single node declared as an input
    fn add_chain(&mut self, first: Expr, rest: Vec<(Option<EdgeSign>, Expr)>) -> Result<()> {
        let mut source = self.node_of(first)?;
        if rest.is_empty() {
            return match source {
                NodeId::Or(_) => {
                    self.inputs.push(source);
                    Ok(())
                }
                _ => Err(anyhow!("a group alone is not a statement")),
            };
        }
        for (sign, expr) in rest {
            let target = self.node_of(expr)?;
            if let NodeId::And(_) = target {
                return Err(anyhow!("a group cannot be the target of an influence"));
            }
            self.edges.push((source, target.clone(), sign));
            source = target;
        }
        Ok(())
    }

    // `a & !b -> C`, `!A -> B`, `?A -> B`
    fn add_arrow(&mut self, literals: Vec<Literal>, target: String) -> Result<()> {
        let mut nodes = self.literal_nodes(literals)?;
        let target = NodeId::Or(target);
        if nodes.len() == 1 {
            let (source, sign) = nodes.remove(0);
            self.edges.push((source, target, sign));
        } else {
            let and_node = self.and_node(nodes);
            self.edges.push((and_node, target, Some(EdgeSign::Plus)));
        }
        Ok(())
    }

    fn node_of(&mut self, expr: Expr) -> Result<NodeId> {
        match expr {
            Expr::Node(n) => Ok(NodeId::Or(n)),
            Expr::Group(literals) => {
                let nodes = self.literal_nodes(literals)?;
                Ok(self.and_node(nodes))
            }
            Expr::Function(f, arguments) => self.aux_node(&f, arguments),
        }
    }

    fn literal_nodes(&mut self, literals: Vec<Literal>) -> Result<Vec<(NodeId, Option<EdgeSign>)>> {
        literals
            .into_iter()
            .map(|(sign, expr)| self.node_of(expr).map(|n| (n, sign)))
            .collect()
    }

    fn and_node(&mut self, literals: Vec<(NodeId, Option<EdgeSign>)>) -> NodeId {
        let name = literals
            .iter()
            .map(|(n, s)| {
                let prefix = match s {
                    Some(EdgeSign::Plus) => "",
                    Some(EdgeSign::Minus) => "!",
                    None => "?",
                };
                format!("{}{}", prefix, n.name())
            })
            .collect::<Vec<String>>()
            .join(" & ");
        let and_node = NodeId::And(name);
        for (n, s) in literals {
            self.edges.push((n, and_node.clone(), s));
        }
        and_node
    }

    // auxiliary nodes stand between their arguments and the rest of the statement
    fn aux_node(&mut self, function: &str, arguments: Vec<String>) -> Result<NodeId> {
        let sign = match (function, arguments.len()) {
            ("opposite_sign", 1) => EdgeSign::Minus,
            ("strong_inhibitor", n) if n > 0 => EdgeSign::Plus,
            ("opposite_sign", n) => {
                return Err(anyhow!("opposite_sign expects a single argument, got {}", n))
            }
            (f, _) => return Err(anyhow!(r#"unknown function "{}""#, f)),
        };
        let aux = NodeId::Aux(format!("{}({})", function, arguments.join(",")));
        for a in arguments {
            self.edges.push((NodeId::Or(a), aux.clone(), Some(sign)));
        }
        Ok(aux)
    }
}

fn add_statement(network: &mut Network, statement: Statement) -> WarningResult<(), String> {
    let mut warnings = vec![];
    for (source, target, sign) in statement.edges {
        if let Some(s) = sign {
            if network
                .edge_signs(&source, &target)
                .map(|signs| signs.contains(&s.opposite()))
                .unwrap_or(false)
            {
                warnings.push(format!(
                    "the influence {} -> {} is now both an activation and an inhibition",
                    source, target
                ));
            }
        }
        network.add_edge(source, target, sign);
    }
    statement
        .inputs
        .into_iter()
        .for_each(|i| network.add_input(i));
    WarningResult::new((), warnings)
}

/// A reader for influence graphs.
///
/// Each line holds one statement; empty lines and lines beginning by `#` are ignored.
/// Malformed lines are skipped after a warning is raised.
///
/// # Network format
///
/// A statement is either a chain of nodes separated by signs (`1` for an activation, `-1` for an inhibition, `?` for an unknown influence),
/// or an arrow statement whose left side is a conjunction of literals (`!` for an inhibition, `?` for an unknown influence).
/// A node alone on its line is an input.
/// Parenthesized conjunctions are AND nodes, whose name is the conjunction itself.
/// `opposite_sign(a)` is an auxiliary node inhibited by `a`,
/// and `strong_inhibitor(a,b)` an auxiliary node activated by `a` and `b`.
///
/// ```text
/// # comment
/// A 1 B -1 C
/// (A & !D) 1 E
/// A & !B -> F
/// ?C -> G
/// opposite_sign(A) 1 H
/// I
/// ```
///
/// # Example
///
/// ```
/// # use iggy::graph::Network;
/// # use iggy::io::{InstanceReader, NetworkReader};
/// fn read_network_from_str(s: &str) -> Network {
///     let reader = NetworkReader::default();
///     reader.read(&mut s.as_bytes()).expect("cannot read the network")
/// }
/// assert_eq!(3, read_network_from_str("A 1 B -1 C").n_nodes());
/// ```
#[derive(Default)]
pub struct NetworkReader {
    warning_handlers: Vec<WarningHandler>,
}

impl InstanceReader<Network> for NetworkReader {
    fn read(&self, reader: &mut dyn Read) -> Result<Network> {
        let mut network = Network::default();
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
            let trimmed = l.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match Statement::parse(trimmed) {
                Ok(s) => add_statement(&mut network, s).consume_warnings(warning_consumer),
                Err(e) => warning_consumer(vec![format!(r#"skipping "{}": {}"#, trimmed, e)]),
            }
        }
        Ok(network)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
