use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Logical fields a contact sheet can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Address,
    Department,
    Contact,
    Phone,
    Tags,
    Parking,
    Notes,
    Image,
    LastVisit,
    Favorite,
}

impl Field {
    pub const ALL: [Self; 11] = [
        Self::Name,
        Self::Address,
        Self::Department,
        Self::Contact,
        Self::Phone,
        Self::Tags,
        Self::Parking,
        Self::Notes,
        Self::Image,
        Self::LastVisit,
        Self::Favorite,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
            Self::Department => "department",
            Self::Contact => "contact",
            Self::Phone => "phone",
            Self::Tags => "tags",
            Self::Parking => "parking",
            Self::Notes => "notes",
            Self::Image => "image",
            Self::LastVisit => "last_visit",
            Self::Favorite => "favorite",
        }
    }

    const fn required(self) -> bool {
        matches!(self, Self::Name | Self::Address)
    }
}

/// Accepted column headers per field, in lookup order.
///
/// Sheets drift between variants (`부서명` vs `부서`, optional photo/visit/favorite
/// columns), so every field is a list and the first header present in the table wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub name: Vec<String>,
    pub address: Vec<String>,
    pub department: Vec<String>,
    pub contact: Vec<String>,
    pub phone: Vec<String>,
    pub tags: Vec<String>,
    pub parking: Vec<String>,
    pub notes: Vec<String>,
    pub image: Vec<String>,
    pub last_visit: Vec<String>,
    pub favorite: Vec<String>,
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            name: headers(&["거래처명"]),
            address: headers(&["주소"]),
            department: headers(&["부서명", "부서"]),
            contact: headers(&["담당자"]),
            phone: headers(&["연락처"]),
            tags: headers(&["취급품목"]),
            parking: headers(&["주차 및 진입 정보", "주차정보"]),
            notes: headers(&["거래처 성향 / 특이사항", "특이사항"]),
            image: headers(&["이미지"]),
            last_visit: headers(&["마지막 방문일"]),
            favorite: headers(&["즐겨찾기"]),
        }
    }
}

impl ColumnAliases {
    #[must_use]
    pub fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::Department => &self.department,
            Field::Contact => &self.contact,
            Field::Phone => &self.phone,
            Field::Tags => &self.tags,
            Field::Parking => &self.parking,
            Field::Notes => &self.notes,
            Field::Image => &self.image,
            Field::LastVisit => &self.last_visit,
            Field::Favorite => &self.favorite,
        }
    }

    fn for_field_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Address => &mut self.address,
            Field::Department => &mut self.department,
            Field::Contact => &mut self.contact,
            Field::Phone => &mut self.phone,
            Field::Tags => &mut self.tags,
            Field::Parking => &mut self.parking,
            Field::Notes => &mut self.notes,
            Field::Image => &mut self.image,
            Field::LastVisit => &mut self.last_visit,
            Field::Favorite => &mut self.favorite,
        }
    }

    /// Append `extra` aliases after the built-in ones, skipping duplicates.
    #[must_use]
    pub fn merged_with(mut self, extra: &Self) -> Self {
        for field in Field::ALL {
            let target = self.for_field_mut(field);
            for alias in extra.for_field(field) {
                let alias = alias.trim();
                if !alias.is_empty() && !target.iter().any(|a| a == alias) {
                    target.push(alias.to_string());
                }
            }
        }
        self
    }

    /// Pick the header to read for each field from the headers present in a table.
    ///
    /// An empty header list (empty table) resolves nothing and is not an error.
    pub fn resolve(&self, present: &[&str]) -> Result<ColumnMap> {
        let mut map = ColumnMap::default();
        if present.is_empty() {
            return Ok(map);
        }

        for field in Field::ALL {
            let aliases = self.for_field(field);
            let found = aliases
                .iter()
                .find(|alias| present.contains(&alias.as_str()))
                .cloned();
            if found.is_none() && field.required() {
                return Err(IngestError::SchemaMismatch(format!(
                    "no column for {} (tried {})",
                    field.as_str(),
                    aliases.join(", ")
                )));
            }
            log::debug!("column {} -> {:?}", field.as_str(), found);
            map.set(field, found);
        }
        Ok(map)
    }
}

/// Resolved header per field for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [Option<String>; 11],
}

impl ColumnMap {
    #[must_use]
    pub fn column(&self, field: Field) -> Option<&str> {
        self.columns[field as usize].as_deref()
    }

    fn set(&mut self, field: Field, column: Option<String>) {
        self.columns[field as usize] = column;
    }
}
