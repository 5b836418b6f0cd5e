//! Solid color pass
//!
//! Clears the frame and draws nothing else. Used by the `clear_window` demo.

/// Clears a render target to a fixed color
#[derive(Clone, Copy, Debug)]
pub struct ClearPass {
    pub color: wgpu::Color,
}

impl ClearPass {
    pub fn new(color: wgpu::Color) -> Self {
        Self { color }
    }

    /// Build from an `[r, g, b, a]` array in 0..1
    pub fn from_rgba(rgba: [f32; 4]) -> Self {
        Self::new(wgpu::Color {
            r: rgba[0] as f64,
            g: rgba[1] as f64,
            b: rgba[2] as f64,
            a: rgba[3] as f64,
        })
    }

    /// Record the clear into `encoder`
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba() {
        let pass = ClearPass::from_rgba([0.72, 0.45, 0.20, 1.0]);
        assert!((pass.color.r - 0.72).abs() < 1e-6);
        assert!((pass.color.g - 0.45).abs() < 1e-6);
        assert!((pass.color.b - 0.20).abs() < 1e-6);
        assert_eq!(pass.color.a, 1.0);
    }
}
