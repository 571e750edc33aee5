//! Parser

mod props;

// Re-export.
pub use props::*;

use crate::error::SceneError;
use octray_core::base::Float;
use pest::Parser as _;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
struct SceneParser;

/// One parsed block: its type name, optional label and properties.
#[derive(Debug)]
pub struct Block {
    /// Block type, e.g. `sphere` or `point_light`.
    pub name: String,

    /// Optional label; materials use it as their lookup key.
    pub label: Option<String>,

    /// Properties.
    pub props: Props,
}

/// Parses a scene description into its blocks, in file order.
///
/// * `text` - Scene description text.
pub fn parse_blocks(text: &str) -> Result<Vec<Block>, SceneError> {
    let scene = SceneParser::parse(Rule::scene, text)
        .map_err(|e| SceneError::Parse(Box::new(e)))?
        .next()
        .expect("grammar yields exactly one scene");

    let mut blocks = vec![];
    for pair in scene.into_inner() {
        if pair.as_rule() == Rule::block {
            blocks.push(parse_block(pair));
        }
    }
    Ok(blocks)
}

fn parse_block(pair: pest::iterators::Pair<'_, Rule>) -> Block {
    let mut inner = pair.into_inner();

    let name = inner.next().expect("block name").as_str().to_string();

    let mut label = None;
    let mut props = Props::default();

    for item in inner {
        match item.as_rule() {
            Rule::quoted_str => {
                label = Some(unquote(item));
            }
            Rule::prop => {
                let mut prop = item.into_inner();
                let key = prop.next().expect("prop name").as_str();

                let mut floats = vec![];
                let mut strings = vec![];
                for value in prop {
                    match value.as_rule() {
                        Rule::number => {
                            // The grammar only admits valid numbers.
                            floats.push(value.as_str().parse::<Float>().expect("number"));
                        }
                        Rule::quoted_str => strings.push(unquote(value)),
                        _ => unreachable!("prop values are numbers or strings"),
                    }
                }
                if !floats.is_empty() {
                    props.add_floats(key, floats);
                }
                if !strings.is_empty() {
                    props.add_strings(key, strings);
                }
            }
            _ => {}
        }
    }

    Block { name, label, props }
}

fn unquote(pair: pest::iterators::Pair<'_, Rule>) -> String {
    pair.into_inner()
        .next()
        .expect("quoted string inner")
        .as_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_labels_and_props() {
        let text = r#"
            // A labelled material and a sphere using it.
            material "red" {
                kd 0.9 0 0
                shininess 32
            }
            sphere {
                center 0 0 -2
                radius 1.5
                material "red"
            }
        "#;

        let blocks = parse_blocks(text).unwrap();
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].name, "material");
        assert_eq!(blocks[0].label.as_deref(), Some("red"));
        assert_eq!(blocks[0].props.find_one_float("shininess", 0.0), 32.0);

        assert_eq!(blocks[1].name, "sphere");
        assert!(blocks[1].label.is_none());
        assert_eq!(blocks[1].props.find_one_float("radius", 0.0), 1.5);
        assert_eq!(blocks[1].props.find_one_string("material"), Some("red"));
    }

    #[test]
    fn scientific_notation_and_signs() {
        let blocks = parse_blocks("camera { fov 4.5e1 eye -1 +2 1e-3 }").unwrap();
        let props = &blocks[0].props;
        assert_eq!(props.find_one_float("fov", 0.0), 45.0);
        assert_eq!(props.find_point("eye").unwrap().z, 0.001);
    }

    #[test]
    fn syntax_error_reported() {
        assert!(matches!(
            parse_blocks("sphere { radius }"),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn empty_scene_is_valid() {
        assert!(parse_blocks("").unwrap().is_empty());
    }
}
