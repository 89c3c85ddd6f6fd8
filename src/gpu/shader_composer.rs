use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use super::device::ShaderSource;

/// Mobile (instanced cube) shader.
pub const MOBILE_SHADER: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/mobile.wgsl"),
    file_path: "mobile.wgsl",
};

/// Floor shader.
pub const FLOOR_SHADER: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/floor.wgsl"),
    file_path: "floor.wgsl",
};

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[ModuleDef {
    source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
    file_path: "modules/lighting.wgsl",
}];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared WGSL modules are registered at construction. Consuming shaders use
/// `#import triview::module_name` to pull them in. The composer produces
/// `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Register all shared modules.
    ///
    /// # Errors
    ///
    /// Returns the composer error if a shared module fails to parse.
    pub fn new() -> Result<Self, Box<ComposerError>> {
        let mut composer = Composer::default();
        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(Box::new)?;
        }
        Ok(Self { composer })
    }

    /// Compose a shader into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns the composer error if the shader or its imports fail.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: &ShaderSource,
    ) -> Result<wgpu::ShaderModule, Box<ComposerError>> {
        let naga_module = self.compose_naga(shader)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns the composer error if the shader or its imports fail.
    pub fn compose_naga(
        &mut self,
        shader: &ShaderSource,
    ) -> Result<naga::Module, Box<ComposerError>> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source,
                file_path: shader.file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in [MOBILE_SHADER, FLOOR_SHADER] {
            if let Err(e) = composer.compose_naga(&shader) {
                panic!("shader '{}' failed to compose: {e}", shader.file_path);
            }
        }
    }

    #[test]
    fn composed_shaders_expose_entry_points() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in [MOBILE_SHADER, FLOOR_SHADER] {
            let module = composer.compose_naga(&shader).unwrap();
            let names: Vec<&str> = module
                .entry_points
                .iter()
                .map(|ep| ep.name.as_str())
                .collect();
            assert!(names.contains(&"vs_main"), "{}", shader.file_path);
            assert!(names.contains(&"fs_main"), "{}", shader.file_path);
        }
    }
}
