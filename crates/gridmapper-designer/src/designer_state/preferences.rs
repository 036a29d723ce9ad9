//! Display preferences for the session owner.

use super::EditorState;
use gridmapper_core::{ClockTime, Meridiem, StoreResult, TimeOfDay, UserPreferences};
use tracing::debug;

impl EditorState {
    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Adopt the owner's stored preferences, keeping the defaults when none
    /// have been saved yet.
    pub async fn load_preferences(&mut self) -> StoreResult<&UserPreferences> {
        if let Some(stored) = self.store.preferences_for(self.owner).await? {
            debug!(dark_mode = stored.dark_mode, time_of_day = %stored.time_of_day, "loaded preferences");
            self.preferences = stored;
        }
        Ok(&self.preferences)
    }

    pub async fn set_dark_mode(&mut self, dark_mode: bool) -> StoreResult<&UserPreferences> {
        let mut prefs = self.preferences.clone();
        prefs.set_dark_mode(dark_mode);
        self.save_preferences(prefs).await
    }

    pub async fn set_time_of_day(&mut self, time_of_day: TimeOfDay) -> StoreResult<&UserPreferences> {
        let mut prefs = self.preferences.clone();
        prefs.set_time_of_day(time_of_day);
        self.save_preferences(prefs).await
    }

    pub async fn set_custom_time(
        &mut self,
        time: ClockTime,
        am_pm: Meridiem,
    ) -> StoreResult<&UserPreferences> {
        let mut prefs = self.preferences.clone();
        prefs.set_custom_time(time, am_pm);
        self.save_preferences(prefs).await
    }

    async fn save_preferences(&mut self, prefs: UserPreferences) -> StoreResult<&UserPreferences> {
        self.preferences = self.store.save_preferences(prefs).await?;
        Ok(&self.preferences)
    }
}
