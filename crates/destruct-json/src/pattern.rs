//! Pattern documents.
//! 模式文档。
//!
//! ```json
//! { "array": [ { "bind": "head" }, null, { "bind": "tail", "rest": true } ] }
//! { "object": [ { "key": "foo", "bind": "baz", "default": { "lit": 3 } } ] }
//! ```

use std::collections::BTreeMap;

use destruct_pattern::{Element, Entry, Expr, Pattern, PropertyKey, Slot, Target};
use serde::{Deserialize, Serialize};

use crate::{DocError, value_from_json};

/// A pattern document. / 模式文档。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDoc {
    /// Positional pattern; `null` slots are elisions. / 位置模式；`null` 表示跳过。
    Array(Vec<Option<SlotDoc>>),
    /// Keyed pattern. / 键模式。
    Object(Vec<EntryDoc>),
}

/// A positional slot. / 位置槽。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ExprDoc>,
    /// Collect the remaining elements. / 收集剩余元素。
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rest: bool,
}

/// A keyed entry. Without a target, the key itself is bound.
/// 键条目。没有目标时直接绑定键名。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<ExprDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ExprDoc>,
}

/// A member assignment target `object[key]`. / 成员赋值目标 `object[key]`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDoc {
    pub object: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<ExprDoc>,
}

/// A default or computed-key expression. / 默认值或计算键表达式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprDoc {
    Lit(serde_json::Value),
    Ref(String),
    Array(Vec<ExprDoc>),
    Object(BTreeMap<String, ExprDoc>),
}

impl PatternDoc {
    /// Convert to a validated pattern. / 转换为经过校验的模式。
    pub fn into_pattern(self) -> Result<Pattern, DocError> {
        let pattern = self.lower()?;
        pattern.validate()?;
        Ok(pattern)
    }

    fn lower(self) -> Result<Pattern, DocError> {
        match self {
            PatternDoc::Array(slots) => {
                let slots = slots
                    .into_iter()
                    .map(|slot| slot.map_or(Ok(Slot::Skip), SlotDoc::lower))
                    .collect::<Result<_, _>>()?;
                Ok(Pattern::Positional(slots))
            }
            PatternDoc::Object(entries) => {
                let entries = entries
                    .into_iter()
                    .map(EntryDoc::lower)
                    .collect::<Result<_, _>>()?;
                Ok(Pattern::Keyed(entries))
            }
        }
    }
}

impl SlotDoc {
    fn lower(self) -> Result<Slot, DocError> {
        let target = lower_target(self.bind, self.pattern, self.member)?
            .ok_or_else(|| DocError::Target("slot needs one of bind, pattern or member".to_string()))?;
        if self.rest {
            if self.default.is_some() {
                return Err(DocError::Target("rest element cannot have a default".to_string()));
            }
            return Ok(Slot::Rest(target));
        }
        let default = self.default.map(ExprDoc::lower).transpose()?;
        Ok(Slot::Element(Element { target, default }))
    }
}

impl EntryDoc {
    fn lower(self) -> Result<Entry, DocError> {
        let shorthand = self.key.clone();
        let key = lower_key(self.key, self.computed, "entry")?;
        let target = match lower_target(self.bind, self.pattern, self.member)? {
            Some(target) => target,
            None => match shorthand {
                Some(name) => Target::Name(name),
                None => {
                    return Err(DocError::Target(
                        "computed entry needs one of bind, pattern or member".to_string(),
                    ));
                }
            },
        };
        let default = self.default.map(ExprDoc::lower).transpose()?;
        Ok(Entry { key, target, default })
    }
}

impl ExprDoc {
    pub fn lower(self) -> Result<Expr, DocError> {
        Ok(match self {
            ExprDoc::Lit(json) => Expr::Literal(value_from_json(&json)?),
            ExprDoc::Ref(name) => Expr::Ref(name),
            ExprDoc::Array(items) => Expr::Array(
                items
                    .into_iter()
                    .map(ExprDoc::lower)
                    .collect::<Result<_, _>>()?,
            ),
            ExprDoc::Object(fields) => Expr::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| -> Result<(String, Expr), DocError> { Ok((k, v.lower()?)) })
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

fn lower_key(
    key: Option<String>,
    computed: Option<ExprDoc>,
    what: &str,
) -> Result<PropertyKey, DocError> {
    match (key, computed) {
        (Some(name), None) => Ok(PropertyKey::Name(name)),
        (None, Some(expr)) => Ok(PropertyKey::Computed(expr.lower()?)),
        _ => Err(DocError::Target(format!(
            "{} needs exactly one of key or computed",
            what
        ))),
    }
}

fn lower_target(
    bind: Option<String>,
    pattern: Option<PatternDoc>,
    member: Option<MemberDoc>,
) -> Result<Option<Target>, DocError> {
    match (bind, pattern, member) {
        (None, None, None) => Ok(None),
        (Some(name), None, None) => Ok(Some(Target::Name(name))),
        (None, Some(pattern), None) => Ok(Some(Target::Pattern(Box::new(pattern.lower()?)))),
        (None, None, Some(member)) => Ok(Some(Target::Member {
            key: lower_key(member.key, member.computed, "member")?,
            object: member.object,
        })),
        _ => Err(DocError::Target(
            "bind, pattern and member are mutually exclusive".to_string(),
        )),
    }
}
