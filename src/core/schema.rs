use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub optional: bool,
    pub computed: bool,
}

impl Attribute {
    pub fn computed_string(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::String,
            optional: false,
            computed: true,
        }
    }

    pub fn computed_bool(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::Bool,
            optional: false,
            computed: true,
        }
    }

    /// 可由使用者設定，未設定時由讀取結果填入
    pub fn optional_computed_string(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::String,
            optional: true,
            computed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceSchema {
    pub type_name: &'static str,
    pub version: u32,
    pub attributes: Vec<Attribute>,
}

impl DataSourceSchema {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            version: 0,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

}

pub const PROJECT_DATA_SOURCE: &str = "identity_project_v3";

pub fn project_schema() -> DataSourceSchema {
    DataSourceSchema::new(PROJECT_DATA_SOURCE)
        .with_attribute(Attribute::computed_string("id"))
        .with_attribute(Attribute::optional_computed_string("region"))
        .with_attribute(Attribute::optional_computed_string("domain_id"))
        .with_attribute(Attribute::optional_computed_string("name"))
        .with_attribute(Attribute::optional_computed_string("parent_id"))
        .with_attribute(Attribute::computed_string("description"))
        .with_attribute(Attribute::computed_bool("is_domain"))
        .with_attribute(Attribute::computed_bool("enabled"))
}
