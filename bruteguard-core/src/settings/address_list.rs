use serde::Deserialize;

/// Storage backend of the allow/deny lists.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub enum AddressListBackend {
    #[serde(rename = "memory")]
    #[default]
    Memory,
    #[serde(rename = "file")]
    File,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[readonly::make]
pub struct AddressListSettings {
    #[serde(default)]
    pub backend: AddressListBackend,
    /// Location of the YAML document for the `file` backend
    pub path: Option<String>,
}

impl AddressListSettings {
    pub fn new(backend: AddressListBackend, path: Option<String>) -> Self {
        AddressListSettings { backend, path }
    }

    pub fn validate(&self) -> Result<(), String> {
        match (&self.backend, &self.path) {
            (AddressListBackend::File, None) => {
                Err("address_list.path is required for the file backend".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_requires_path() {
        let settings = AddressListSettings::new(AddressListBackend::File, None);
        assert!(settings.validate().is_err());

        let settings =
            AddressListSettings::new(AddressListBackend::File, Some("lists.yaml".to_string()));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_backend_defaults_to_memory() {
        let settings: AddressListSettings = serde_norway::from_str("path: null").unwrap();
        assert_eq!(settings.backend, AddressListBackend::Memory);
    }
}
