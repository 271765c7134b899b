#[allow(async_fn_in_trait)]
pub trait OnboardingService {
    async fn get_onboarding_guide_seen(&self) -> Result<bool, String>;
    async fn set_onboarding_guide_seen(&self, seen: bool) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait OnboardingRepository {
    async fn read_onboarding_guide_seen(&self) -> Result<bool, String>;
    async fn write_onboarding_guide_seen(&self, seen: bool) -> Result<(), String>;
}
