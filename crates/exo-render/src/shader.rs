//! Shader module registry.
//!
//! Each WGSL source is compiled once and shared through an `Arc` under a
//! stable id. Pipelines ask the library for a module by id rather than
//! compiling their own copy.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{id}' not found in library")]
    NotLoaded { id: String },
}

/// Compiled shader modules keyed by id.
#[derive(Default)]
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the module registered under `id`, compiling `source` only on
    /// first request.
    pub fn get_or_compile(
        &mut self,
        device: &wgpu::Device,
        id: &str,
        source: &str,
    ) -> Arc<wgpu::ShaderModule> {
        if let Some(module) = self.modules.get(id) {
            debug!("Reusing compiled shader '{id}'");
            return module.clone();
        }

        let module = Arc::new(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(id),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        }));
        self.modules.insert(id.to_string(), module.clone());
        info!("Compiled shader '{id}'");
        module
    }

    /// Look up a previously compiled module.
    pub fn get(&self, id: &str) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        self.modules
            .get(id)
            .cloned()
            .ok_or_else(|| ShaderError::NotLoaded { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SHADER: &str = r#"
        @vertex
        fn vs_main(@builtin(vertex_index) idx: u32) -> @builtin(position) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    fn create_test_device() -> Option<wgpu::Device> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions::default())
                .await
                .ok()?;
            let (device, _queue) = adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()?;
            Some(device)
        })
    }

    #[test]
    fn test_library_starts_empty() {
        let library = ShaderLibrary::new();
        assert!(library.is_empty());
        assert!(!library.contains("surface"));
    }

    #[test]
    fn test_get_unknown_id_is_error() {
        let library = ShaderLibrary::new();
        assert!(matches!(
            library.get("missing"),
            Err(ShaderError::NotLoaded { id }) if id == "missing"
        ));
    }

    #[test]
    fn test_second_request_reuses_module() {
        let Some(device) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        let a = library.get_or_compile(&device, "surface", VALID_SHADER);
        let b = library.get_or_compile(&device, "surface", "not even wgsl");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_distinct_ids_coexist() {
        let Some(device) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        library.get_or_compile(&device, "surface", VALID_SHADER);
        library.get_or_compile(&device, "atmosphere", VALID_SHADER);
        assert_eq!(library.len(), 2);
        assert!(library.get("atmosphere").is_ok());
    }
}
