use std::sync::Arc;
use winit::window::Window;

// ---------------------------------------------------------------------------
// RendererError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("surface error: {0}")]
    SurfaceError(String),

    #[error("no GPU-class adapter available; a hardware-accelerated backend is required")]
    AdapterNotFound,

    #[error("device error: {0}")]
    DeviceError(String),

    #[error("invalid point field: {0}")]
    InvalidField(String),

    #[error("rotation axis is degenerate (zero length or non-finite)")]
    DegenerateAxis,
}

impl From<wgpu::SurfaceError> for RendererError {
    fn from(e: wgpu::SurfaceError) -> Self {
        RendererError::SurfaceError(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RendererError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RendererError::DeviceError(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// PhysicalSize
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

// ---------------------------------------------------------------------------
// GpuContext
// ---------------------------------------------------------------------------

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize,
}

impl GpuContext {
    /// Initialize wgpu: create instance, surface, adapter, device, and
    /// configure the surface for rendering.
    ///
    /// There is deliberately no software fallback: thousands of per-point
    /// transforms per frame need a data-parallel device, and a CPU rasterizer
    /// cannot hold the frame budget. If no hardware adapter exists this
    /// fails with [`RendererError::AdapterNotFound`].
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RendererError> {
        let inner_size = window.inner_size();
        let width = inner_size.width.max(1);
        let height = inner_size.height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window)
            .map_err(|e| RendererError::SurfaceError(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;

        let adapter_info = adapter.get_info();
        if adapter_info.device_type == wgpu::DeviceType::Cpu {
            // A software rasterizer technically satisfies the adapter request
            // but not the frame budget. Refuse it.
            tracing::error!(
                "adapter {} is a software rasterizer; refusing",
                adapter_info.name
            );
            return Err(RendererError::AdapterNotFound);
        }
        tracing::info!(
            "GPU adapter: {} ({:?}, {:?})",
            adapter_info.name,
            adapter_info.device_type,
            adapter_info.backend,
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("nimbus-renderer device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
        tracing::info!(
            "surface format: {format:?} (available: {:?})",
            surface_caps.formats
        );

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            size: PhysicalSize { width, height },
        })
    }

    /// Reconfigure the surface after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);

        self.size = PhysicalSize { width, height };
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Get the next frame's surface texture.
    pub fn current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Return the surface texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
