//! Validates the shape shader and the vertex layout it is fed with.

use chaindrive::{ShapeVertex, SHADER_SOURCE};

/// Validates WGSL code using naga.
fn validate_wgsl(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

// ============================================================================
// Shader
// ============================================================================

#[test]
fn test_shape_shader_validates() {
    if let Err(e) = validate_wgsl(SHADER_SOURCE) {
        panic!("{}", e);
    }
}

#[test]
fn test_shape_shader_entry_points() {
    let module = validate_wgsl(SHADER_SOURCE).expect("valid shader");
    let names: Vec<&str> = module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}

// ============================================================================
// Vertex layout
// ============================================================================

#[test]
fn test_vertex_layout_matches_shader_inputs() {
    let layout = ShapeVertex::layout();
    assert_eq!(layout.array_stride, std::mem::size_of::<ShapeVertex>() as u64);
    assert_eq!(layout.attributes.len(), 2);
    assert_eq!(layout.attributes[0].shader_location, 0);
    assert_eq!(layout.attributes[1].shader_location, 1);
    assert_eq!(layout.attributes[1].offset, 8);
}
