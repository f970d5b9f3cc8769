/*
 * Renderer Module
 *
 * This module handles the rendering of the savannah simulation.
 *
 * The scene does not draw directly: it describes itself as render entities
 * (mesh handle, position, uniform scale, color) submitted to a RenderBackend.
 * The windowed app uses DrawBackend, which resolves handles to simple shapes
 * and draws them through nannou; headless tests substitute their own backend
 * and inspect what the scene emitted.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::camera::Camera;
use crate::AGENT_SIZE;

// Opaque handle to a mesh registered with a backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshHandle(pub usize);

// One drawable thing for the current frame
#[derive(Clone, Copy, Debug)]
pub struct RenderEntity {
    pub mesh: MeshHandle,
    pub position: Vec3,
    pub scale: f32,
    pub color: Vec4,
}

pub trait RenderBackend {
    // Resolve a mesh by name, registering it on first use. Unknown names
    // resolve to a fallback shape rather than failing.
    fn load_or_get_mesh(&mut self, name: &str) -> MeshHandle;

    // Register a procedural line grid of cols x rows cells centered on the
    // origin
    fn generate_grid_mesh(&mut self, cell_size: f32, columns: u32, rows: u32) -> MeshHandle;

    fn begin_frame(&mut self);
    fn submit(&mut self, entity: &RenderEntity);
    fn end_frame(&mut self);
}

// Shapes the draw backend knows how to rasterize
#[derive(Clone, Debug, PartialEq)]
enum MeshSpec {
    Rectangle,
    Triangle,
    Diamond,
    Grid {
        cell_size: f32,
        columns: u32,
        rows: u32,
    },
}

// Backend that draws entities into a nannou Draw context through the camera
pub struct DrawBackend<'a> {
    draw: &'a Draw,
    camera: &'a Camera,
    window_rect: Rect,
    meshes: Vec<(String, MeshSpec)>,
}

impl<'a> DrawBackend<'a> {
    pub fn new(draw: &'a Draw, camera: &'a Camera, window_rect: Rect) -> Self {
        Self {
            draw,
            camera,
            window_rect,
            meshes: Vec::new(),
        }
    }

    fn register(&mut self, name: &str, spec: MeshSpec) -> MeshHandle {
        if let Some(index) = self.meshes.iter().position(|(n, s)| n == name && *s == spec) {
            return MeshHandle(index);
        }
        self.meshes.push((name.to_string(), spec));
        MeshHandle(self.meshes.len() - 1)
    }

    fn draw_grid(&self, cell_size: f32, columns: u32, rows: u32, color: Vec4) {
        let half_width = columns as f32 * cell_size / 2.0;
        let half_height = rows as f32 * cell_size / 2.0;
        let stroke = rgba(color.x, color.y, color.z, color.w);

        // Vertical lines
        for c in 0..=columns {
            let x = -half_width + c as f32 * cell_size;
            let top = self.camera.world_to_screen(vec2(x, half_height), self.window_rect);
            let bottom = self.camera.world_to_screen(vec2(x, -half_height), self.window_rect);
            self.draw
                .line()
                .start(pt2(top.x, top.y))
                .end(pt2(bottom.x, bottom.y))
                .weight(1.0)
                .color(stroke);
        }

        // Horizontal lines
        for r in 0..=rows {
            let y = -half_height + r as f32 * cell_size;
            let left = self.camera.world_to_screen(vec2(-half_width, y), self.window_rect);
            let right = self.camera.world_to_screen(vec2(half_width, y), self.window_rect);
            self.draw
                .line()
                .start(pt2(left.x, left.y))
                .end(pt2(right.x, right.y))
                .weight(1.0)
                .color(stroke);
        }
    }
}

impl<'a> RenderBackend for DrawBackend<'a> {
    fn load_or_get_mesh(&mut self, name: &str) -> MeshHandle {
        let spec = match name {
            "Rectangle" => MeshSpec::Rectangle,
            "Triangle" => MeshSpec::Triangle,
            "Diamond" => MeshSpec::Diamond,
            // Unknown mesh names fall back to a rectangle
            _ => MeshSpec::Rectangle,
        };
        self.register(name, spec)
    }

    fn generate_grid_mesh(&mut self, cell_size: f32, columns: u32, rows: u32) -> MeshHandle {
        self.register(
            "Grid",
            MeshSpec::Grid {
                cell_size,
                columns,
                rows,
            },
        )
    }

    fn begin_frame(&mut self) {}

    fn submit(&mut self, entity: &RenderEntity) {
        let spec = match self.meshes.get(entity.mesh.0) {
            Some((_, spec)) => spec.clone(),
            None => return,
        };
        let color = entity.color;
        let screen = self
            .camera
            .world_to_screen(vec2(entity.position.x, entity.position.y), self.window_rect);
        let size = AGENT_SIZE * entity.scale * self.camera.zoom;
        let fill = rgba(color.x, color.y, color.z, color.w);
        let half = size / 2.0;

        match spec {
            MeshSpec::Grid {
                cell_size,
                columns,
                rows,
            } => self.draw_grid(cell_size, columns, rows, color),
            MeshSpec::Rectangle => {
                self.draw
                    .rect()
                    .xy(pt2(screen.x, screen.y))
                    .w_h(size, size)
                    .color(fill);
            }
            MeshSpec::Triangle => {
                self.draw
                    .tri()
                    .points(
                        pt2(screen.x, screen.y + half),
                        pt2(screen.x - half, screen.y - half),
                        pt2(screen.x + half, screen.y - half),
                    )
                    .color(fill);
            }
            MeshSpec::Diamond => {
                self.draw
                    .quad()
                    .points(
                        pt2(screen.x, screen.y + half),
                        pt2(screen.x + half, screen.y),
                        pt2(screen.x, screen.y - half),
                        pt2(screen.x - half, screen.y),
                    )
                    .color(fill);
            }
        }
    }

    fn end_frame(&mut self) {}
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(rgb(0.0, 0.0, 0.4));

    let window_rect = app.window_rect();

    let mut backend = DrawBackend::new(&draw, &model.camera, window_rect);
    model.scene.render(&mut backend);

    // Draw debug info if enabled
    if model.params.show_debug {
        crate::ui::draw_debug_info(&draw, &model.debug_info, window_rect, model.camera.zoom);
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
