use super::expr::ExpressionNode;

/// Flatten an expression into minimally-parenthesized filter text
///
/// Only AND/OR groups nested below the top level are wrapped in
/// parentheses. NOT prefixes each child with `-`; a negated multi-term
/// group is always wrapped so the negation covers all of it.
pub fn serialize(node: &ExpressionNode) -> String {
    Serializer { depth: -1 }.node(node)
}

struct Serializer {
    depth: i32,
}

impl Serializer {
    fn node(&mut self, node: &ExpressionNode) -> String {
        match node {
            ExpressionNode::Term(text) => text.clone(),
            ExpressionNode::And(children) => self.group(children, " "),
            ExpressionNode::Or(children) => self.group(children, " OR "),
            ExpressionNode::Not(children) => {
                let mut parts = Vec::with_capacity(children.len());
                for child in children {
                    let text = if child.is_compound() && self.depth < 0 {
                        self.depth += 1;
                        let text = self.node(child);
                        self.depth -= 1;
                        text
                    } else {
                        self.node(child)
                    };
                    parts.push(format!("-{text}"));
                }
                parts.join(" ")
            }
        }
    }

    fn group(&mut self, children: &[ExpressionNode], separator: &str) -> String {
        self.depth += 1;
        let body = children
            .iter()
            .map(|child| self.node(child))
            .collect::<Vec<_>>()
            .join(separator);
        let out = if self.depth > 0 {
            format!("({body})")
        } else {
            body
        };
        self.depth -= 1;
        out
    }
}
