//! Type derivation: schema objects to TypeScript declarations.
//!
//! Named definitions become interfaces (or aliases), inline nested objects
//! become synthesized interfaces named `<Parent><Field>`, and string
//! enumerations become enums named the same way. References stay
//! references; nothing is inlined.
//!
//! ## Name Collisions
//!
//! Definition names are reserved first. A synthesized name that is already
//! taken gets the first free numeric suffix (`CardOwner2`). An enum whose
//! name is already registered with the *same* literal values is reused
//! instead, so identical enums collapse into one declaration.

use std::collections::HashSet;
use std::fmt;

use clientgen_schema::{AdditionalProperties, SchemaDocument, SchemaKind, SchemaObject};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::errors::GeneratorError;
use crate::naming::{enum_member_label, pascal_case, property_key, quote, type_identifier};

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    String,
    Number,
    Boolean,
    Any,
    Void,
    /// Reference to an emitted interface, alias or enum.
    Named(String),
    Array(Box<TsType>),
    /// `{ [key: string]: T }`
    Map(Box<TsType>),
    /// Union of string literals, used where no enum is synthesized.
    Literals(Vec<String>),
    /// Inline object literal type, used where no interface is synthesized.
    Object(Vec<Field>),
}

impl TsType {
    pub fn array_of(inner: TsType) -> Self {
        Self::Array(Box::new(inner))
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Any => f.write_str("any"),
            Self::Void => f.write_str("void"),
            Self::Named(name) => f.write_str(name),
            Self::Array(inner) => match inner.as_ref() {
                Self::Literals(values) if values.len() > 1 => write!(f, "({inner})[]"),
                _ => write!(f, "{inner}[]"),
            },
            Self::Map(inner) => write!(f, "{{ [key: string]: {inner} }}"),
            Self::Literals(values) if values.is_empty() => f.write_str("never"),
            Self::Literals(values) => {
                let rendered: Vec<String> = values.iter().map(|v| quote(v)).collect();
                f.write_str(&rendered.join(" | "))
            }
            Self::Object(fields) if fields.is_empty() => f.write_str("{}"),
            Self::Object(fields) => {
                let rendered: Vec<String> = fields.iter().map(Field::signature).collect();
                write!(f, "{{ {} }}", rendered.join("; "))
            }
        }
    }
}

/// One field of an object shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Property name as it appears on the wire.
    pub name: String,
    pub ty: TsType,
    pub required: bool,
    pub description: Option<String>,
}

impl Field {
    /// `name: T` or `name?: T`, with the key quoted when necessary.
    pub fn signature(&self) -> String {
        let optional = if self.required { "" } else { "?" };
        format!("{}{}: {}", property_key(&self.name), optional, self.ty)
    }
}

/// The body of an emitted type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    /// `export interface Name { ... }`
    Interface(Vec<Field>),
    /// `export type Name = T;`
    Alias(TsType),
}

/// One emitted type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub description: Option<String>,
    pub body: TypeBody,
}

impl TypeDecl {
    /// Fields of an interface; empty for aliases.
    pub fn fields(&self) -> &[Field] {
        match &self.body {
            TypeBody::Interface(fields) => fields,
            TypeBody::Alias(_) => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }
}

/// One member of an emitted enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub label: String,
    pub value: String,
}

/// One emitted string enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<EnumMember>,
}

impl EnumDecl {
    /// Builds an enum from distinct literal values, deriving unique labels.
    fn new(name: &str, description: Option<String>, values: &[&str]) -> Self {
        let mut labels = HashSet::new();
        let members = values
            .iter()
            .map(|value| {
                let base = enum_member_label(value);
                let mut label = base.clone();
                let mut n = 2;
                while !labels.insert(label.clone()) {
                    label = format!("{base}{n}");
                    n += 1;
                }
                EnumMember {
                    label,
                    value: (*value).to_string(),
                }
            })
            .collect();
        Self {
            name: name.to_string(),
            description,
            members,
        }
    }

    /// Literal values in declaration order.
    pub fn values(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.value.as_str()).collect()
    }
}

/// Everything type derivation produced for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedTypes {
    pub types: Vec<TypeDecl>,
    pub enums: Vec<EnumDecl>,
    /// Definition name -> emitted identifier.
    definition_names: IndexMap<String, String>,
}

impl DerivedTypes {
    /// The emitted identifier for a definition name.
    pub fn type_name(&self, definition: &str) -> Option<&str> {
        self.definition_names.get(definition).map(String::as_str)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Every emitted type and enum name.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .map(|t| t.name.as_str())
            .chain(self.enums.iter().map(|e| e.name.as_str()))
    }

    /// Resolves a schema without synthesizing declarations.
    ///
    /// Used for parameters and responses: inline objects become object
    /// literal types and string enums become literal unions.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::UnresolvedReference`] for a `$ref` to an
    /// unknown definition, or a parse error for an unsupported ref form.
    pub fn resolve_inline(
        &self,
        schema: &SchemaObject,
        context: &str,
    ) -> Result<TsType, GeneratorError> {
        Ok(match classify(schema)? {
            Shape::Reference(name) => lookup(&self.definition_names, name, context)?,
            Shape::Enum(values) => TsType::Literals(
                distinct(&values).into_iter().map(str::to_string).collect(),
            ),
            Shape::Array(items) => TsType::array_of(match items {
                Some(items) => self.resolve_inline(items, context)?,
                None => TsType::Any,
            }),
            Shape::Object(object) => {
                let mut fields = Vec::new();
                for (name, prop) in object.properties.iter().flatten() {
                    fields.push(Field {
                        name: name.clone(),
                        ty: self.resolve_inline(prop, context)?,
                        required: object.is_required(name),
                        description: prop.description.clone(),
                    });
                }
                TsType::Object(fields)
            }
            Shape::Map(values) => TsType::Map(Box::new(match values {
                Some(values) => self.resolve_inline(values, context)?,
                None => TsType::Any,
            })),
            Shape::Scalar(ty) => ty,
        })
    }
}

/// Derives every type and enum declaration for a document.
///
/// Definitions are processed in input order; types synthesized from a
/// definition follow it. Top-level enum definitions are registered before
/// anything else so that identical synthesized enums collapse into them.
///
/// ## Errors
///
/// Fails on the first malformed or unresolvable schema; nothing is returned
/// for the definitions that did derive.
pub fn derive_types(doc: &SchemaDocument) -> Result<DerivedTypes, GeneratorError> {
    let mut deriver = TypeDeriver::default();

    for raw in doc.definitions.keys() {
        let ident = deriver.claim_name(&type_identifier(raw));
        deriver.definition_names.insert(raw.clone(), ident);
    }

    for (raw, schema) in &doc.definitions {
        if schema.reference.is_none()
            && let Some(values) = schema.string_enum()
        {
            let ident = deriver.definition_names[raw].clone();
            let values = distinct(&values);
            deriver
                .enums
                .insert(ident.clone(), EnumDecl::new(&ident, schema.description.clone(), &values));
        }
    }

    for (raw, schema) in &doc.definitions {
        let ident = deriver.definition_names[raw].clone();
        if deriver.enums.contains_key(&ident) {
            continue;
        }
        debug!(definition = %raw, ident = %ident, "deriving type");
        deriver.derive_definition(&ident, schema)?;
    }

    Ok(DerivedTypes {
        types: deriver.types,
        enums: deriver.enums.into_values().collect(),
        definition_names: deriver.definition_names,
    })
}

/// How a schema object is shaped, independent of naming.
enum Shape<'s> {
    Reference(&'s str),
    Enum(Vec<&'s str>),
    Array(Option<&'s SchemaObject>),
    Object(&'s SchemaObject),
    Map(Option<&'s SchemaObject>),
    Scalar(TsType),
}

fn classify(schema: &SchemaObject) -> Result<Shape<'_>, GeneratorError> {
    if let Some(name) = schema.ref_name()? {
        return Ok(Shape::Reference(name));
    }
    if let Some(values) = schema.string_enum() {
        return Ok(Shape::Enum(values));
    }
    if schema.has_properties() {
        return Ok(Shape::Object(schema));
    }

    let kind = schema.kind();
    Ok(match kind {
        Some(SchemaKind::String) => Shape::Scalar(TsType::String),
        Some(SchemaKind::Integer | SchemaKind::Number) => Shape::Scalar(TsType::Number),
        Some(SchemaKind::Boolean) => Shape::Scalar(TsType::Boolean),
        Some(SchemaKind::Array) => Shape::Array(schema.items.as_deref()),
        Some(SchemaKind::File | SchemaKind::Null) => Shape::Scalar(TsType::Any),
        Some(SchemaKind::Object) | None => match &schema.additional_properties {
            Some(AdditionalProperties::Schema(values)) => Shape::Map(Some(values.as_ref())),
            Some(AdditionalProperties::Flag(true)) => Shape::Map(None),
            _ if kind == Some(SchemaKind::Object) => Shape::Map(None),
            _ if schema.items.is_some() => Shape::Array(schema.items.as_deref()),
            _ => Shape::Scalar(TsType::Any),
        },
    })
}

fn lookup(
    definition_names: &IndexMap<String, String>,
    name: &str,
    context: &str,
) -> Result<TsType, GeneratorError> {
    definition_names
        .get(name)
        .map(|ident| TsType::Named(ident.clone()))
        .ok_or_else(|| GeneratorError::UnresolvedReference {
            name: name.to_string(),
            context: context.to_string(),
        })
}

/// Drops repeated literals, keeping first occurrences in order.
fn distinct<'v>(values: &[&'v str]) -> Vec<&'v str> {
    let mut seen = HashSet::new();
    values.iter().copied().filter(|v| seen.insert(*v)).collect()
}

#[derive(Default)]
struct TypeDeriver {
    definition_names: IndexMap<String, String>,
    taken: HashSet<String>,
    types: Vec<TypeDecl>,
    enums: IndexMap<String, EnumDecl>,
}

impl TypeDeriver {
    /// Reserves `wanted`, or the first free `wanted<N>` if it is taken.
    fn claim_name(&mut self, wanted: &str) -> String {
        if self.taken.insert(wanted.to_string()) {
            return wanted.to_string();
        }
        let name = (2..)
            .map(|n| format!("{wanted}{n}"))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| wanted.to_string());
        warn!(wanted, renamed = %name, "type name already taken, renaming");
        self.taken.insert(name.clone());
        name
    }

    fn register_enum(&mut self, wanted: &str, description: Option<String>, values: &[&str]) -> String {
        let values = distinct(values);
        let mut n = 1;
        loop {
            let candidate = if n == 1 {
                wanted.to_string()
            } else {
                format!("{wanted}{n}")
            };
            n += 1;

            match self.enums.get(&candidate) {
                Some(existing) if existing.values() == values => {
                    debug!(name = %candidate, "reusing identical enum");
                    return candidate;
                }
                Some(_) => continue,
                None => {}
            }

            if self.taken.insert(candidate.clone()) {
                if candidate != wanted {
                    warn!(wanted, renamed = %candidate, "enum name already taken, renaming");
                }
                self.enums
                    .insert(candidate.clone(), EnumDecl::new(&candidate, description, &values));
                return candidate;
            }
        }
    }

    fn derive_definition(&mut self, ident: &str, schema: &SchemaObject) -> Result<(), GeneratorError> {
        let context = format!("definition '{ident}'");
        let is_interface = schema.reference.is_none()
            && (schema.has_properties()
                || (schema.kind() == Some(SchemaKind::Object)
                    && schema.additional_properties.is_none()));

        if is_interface {
            self.derive_interface(ident, schema, &context)
        } else {
            let slot = self.types.len();
            self.types.push(TypeDecl {
                name: ident.to_string(),
                description: schema.description.clone(),
                body: TypeBody::Alias(TsType::Any),
            });
            let alias = self.resolve(schema, &format!("{ident}Item"), &context)?;
            self.types[slot].body = TypeBody::Alias(alias);
            Ok(())
        }
    }

    /// Pushes an interface for an already-claimed name. The declaration
    /// slot is reserved first so that nested types land after their parent.
    fn derive_interface(
        &mut self,
        name: &str,
        schema: &SchemaObject,
        context: &str,
    ) -> Result<(), GeneratorError> {
        let slot = self.types.len();
        self.types.push(TypeDecl {
            name: name.to_string(),
            description: schema.description.clone(),
            body: TypeBody::Interface(Vec::new()),
        });

        let mut fields = Vec::new();
        for (field_name, prop) in schema.properties.iter().flatten() {
            let base = format!("{name}{}", pascal_case(field_name));
            let field_context = format!("field '{field_name}' of {context}");
            fields.push(Field {
                name: field_name.clone(),
                ty: self.resolve(prop, &base, &field_context)?,
                required: schema.is_required(field_name),
                description: prop.description.clone(),
            });
        }

        self.types[slot].body = TypeBody::Interface(fields);
        Ok(())
    }

    fn resolve(&mut self, schema: &SchemaObject, base: &str, context: &str) -> Result<TsType, GeneratorError> {
        Ok(match classify(schema)? {
            Shape::Reference(name) => lookup(&self.definition_names, name, context)?,
            Shape::Enum(values) => {
                TsType::Named(self.register_enum(base, schema.description.clone(), &values))
            }
            Shape::Array(items) => TsType::array_of(match items {
                Some(items) => self.resolve(items, base, context)?,
                None => TsType::Any,
            }),
            Shape::Object(object) => {
                let name = self.claim_name(base);
                self.derive_interface(&name, object, context)?;
                TsType::Named(name)
            }
            Shape::Map(values) => TsType::Map(Box::new(match values {
                Some(values) => self.resolve(values, &format!("{base}Value"), context)?,
                None => TsType::Any,
            })),
            Shape::Scalar(ty) => ty,
        })
    }
}
