use crate::cache::CacheControl;
use crate::service::BrandService;
use axum::extract::FromRef;
use brands_core::BrandEngine;

#[derive(Clone)]
pub struct BrandAppState<T: BrandEngine> {
    pub service: BrandService<T>,
    pub cache_control: CacheControl,
    pub metrics_enabled: bool,
}

impl<T: BrandEngine> BrandAppState<T> {
    pub fn new_with_metrics(engine: T, cache_control: CacheControl) -> Self {
        Self {
            service: BrandService::new(engine),
            cache_control,
            metrics_enabled: true,
        }
    }

    pub fn new_without_metrics(engine: T, cache_control: CacheControl) -> Self {
        Self {
            service: BrandService::new(engine),
            cache_control,
            metrics_enabled: false,
        }
    }
}

impl<T: BrandEngine> FromRef<BrandAppState<T>> for BrandService<T> {
    fn from_ref(input: &BrandAppState<T>) -> Self {
        input.service.clone()
    }
}

impl<T: BrandEngine> FromRef<BrandAppState<T>> for CacheControl {
    fn from_ref(input: &BrandAppState<T>) -> Self {
        input.cache_control.clone()
    }
}
