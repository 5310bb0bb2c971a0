// ABOUTME: Per-user weekly meal plan: 7 days x 4 meal slots, each holding an optional recipe
// ABOUTME: Accepts the legacy bare-id slot shape on input and always emits the object shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recipe::{RecipeId, UserId};

/// Day of the planned week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Day {
    /// All days in plan order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// JSON key of this day
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Afternoon snack
    Snack,
    /// Dinner
    Dinner,
}

impl MealSlot {
    /// All slots in display order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Snack, Self::Dinner];

    /// JSON key of this slot
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }
}

/// A scheduled recipe occupying one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SlotRepr")]
pub struct WeekSlot {
    /// Scheduled recipe
    pub recipe_id: RecipeId,
    /// Optional time of day, free text such as "08:00"
    pub time: Option<String>,
}

impl WeekSlot {
    /// Slot with a recipe and no time
    #[must_use]
    pub const fn new(recipe_id: RecipeId) -> Self {
        Self {
            recipe_id,
            time: None,
        }
    }

    /// Set the time of day
    #[must_use]
    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotRepr {
    Legacy(RecipeId),
    Full(FullSlot),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullSlot {
    recipe_id: RecipeId,
    #[serde(default)]
    time: Option<String>,
}

impl From<SlotRepr> for WeekSlot {
    fn from(repr: SlotRepr) -> Self {
        match repr {
            SlotRepr::Legacy(recipe_id) => Self::new(recipe_id),
            SlotRepr::Full(FullSlot { recipe_id, time }) => Self { recipe_id, time },
        }
    }
}

/// The four meal slots of one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DayPlan {
    /// Breakfast slot
    pub breakfast: Option<WeekSlot>,
    /// Lunch slot
    pub lunch: Option<WeekSlot>,
    /// Snack slot
    pub snack: Option<WeekSlot>,
    /// Dinner slot
    pub dinner: Option<WeekSlot>,
}

impl DayPlan {
    /// Slot contents
    #[must_use]
    pub const fn get(&self, slot: MealSlot) -> Option<&WeekSlot> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Snack => self.snack.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }

    /// Replace slot contents
    pub fn set(&mut self, slot: MealSlot, value: Option<WeekSlot>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = value,
            MealSlot::Lunch => self.lunch = value,
            MealSlot::Snack => self.snack = value,
            MealSlot::Dinner => self.dinner = value,
        }
    }
}

/// Seven fixed days of meal slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Week {
    /// Monday
    pub monday: DayPlan,
    /// Tuesday
    pub tuesday: DayPlan,
    /// Wednesday
    pub wednesday: DayPlan,
    /// Thursday
    pub thursday: DayPlan,
    /// Friday
    pub friday: DayPlan,
    /// Saturday
    pub saturday: DayPlan,
    /// Sunday
    pub sunday: DayPlan,
}

impl Week {
    /// Slots of one day
    #[must_use]
    pub const fn day(&self, day: Day) -> &DayPlan {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    /// Mutable slots of one day
    pub fn day_mut(&mut self, day: Day) -> &mut DayPlan {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }

    /// Schedule a recipe, replacing whatever the slot held
    pub fn schedule(&mut self, day: Day, slot: MealSlot, entry: WeekSlot) {
        self.day_mut(day).set(slot, Some(entry));
    }

    /// Occupied slots, monday to sunday then breakfast to dinner
    pub fn scheduled(&self) -> impl Iterator<Item = (Day, MealSlot, &WeekSlot)> {
        Day::ALL.into_iter().flat_map(move |day| {
            MealSlot::ALL
                .into_iter()
                .filter_map(move |slot| self.day(day).get(slot).map(|entry| (day, slot, entry)))
        })
    }

    /// Scheduled recipe ids in slot order, duplicates kept
    #[must_use]
    pub fn recipe_ids(&self) -> Vec<RecipeId> {
        self.scheduled().map(|(_, _, entry)| entry.recipe_id).collect()
    }
}

/// Stored weekly plan document of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    /// Owning user
    pub user_id: UserId,
    /// Slot contents
    pub week: Week,
    /// Incremented on every save
    pub version: i64,
    /// Last save timestamp
    pub updated_at: DateTime<Utc>,
}
