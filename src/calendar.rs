//! Pure grouping of meal entries into week and day views. Nothing in here
//! touches the database; callers hand in already-fetched rows.

use serde::Serialize;
use time::OffsetDateTime;

use crate::foods::repo::FoodEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn from_name(name: &str) -> Option<Weekday> {
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(name))
    }

    /// Position in the fixed Monday→Sunday ordering. Unrecognized names
    /// fall back to 0 (Monday) instead of failing.
    pub fn index_of(name: &str) -> usize {
        Weekday::from_name(name).map(|d| d as usize).unwrap_or(0)
    }

    pub fn next(self) -> Weekday {
        Weekday::ALL[(self as usize + 1) % 7]
    }

    pub fn prev(self) -> Weekday {
        Weekday::ALL[(self as usize + 6) % 7]
    }

    pub fn today(now: OffsetDateTime) -> Weekday {
        match now.weekday() {
            time::Weekday::Monday => Weekday::Monday,
            time::Weekday::Tuesday => Weekday::Tuesday,
            time::Weekday::Wednesday => Weekday::Wednesday,
            time::Weekday::Thursday => Weekday::Thursday,
            time::Weekday::Friday => Weekday::Friday,
            time::Weekday::Saturday => Weekday::Saturday,
            time::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }

    pub fn from_name(name: &str) -> Option<MealSlot> {
        MealSlot::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }

    /// Unrecognized slot names bucket under 0 (breakfast) so grouping
    /// never drops an entry.
    pub fn index_of(name: &str) -> usize {
        MealSlot::from_name(name).map(|s| s as usize).unwrap_or(0)
    }
}

/// One weekday column of the week view: a bucket per meal slot, entries in
/// input order.
#[derive(Debug, Serialize)]
pub struct DayColumn {
    pub weekday: &'static str,
    pub label: &'static str,
    pub is_today: bool,
    pub breakfast: Vec<FoodEntry>,
    pub lunch: Vec<FoodEntry>,
    pub dinner: Vec<FoodEntry>,
    pub snack: Vec<FoodEntry>,
}

impl DayColumn {
    fn empty(day: Weekday, today: Weekday) -> Self {
        Self {
            weekday: day.as_str(),
            label: day.label(),
            is_today: day == today,
            breakfast: Vec::new(),
            lunch: Vec::new(),
            dinner: Vec::new(),
            snack: Vec::new(),
        }
    }

    fn push(&mut self, slot_index: usize, entry: FoodEntry) {
        match MealSlot::ALL[slot_index] {
            MealSlot::Breakfast => self.breakfast.push(entry),
            MealSlot::Lunch => self.lunch.push(entry),
            MealSlot::Dinner => self.dinner.push(entry),
            MealSlot::Snack => self.snack.push(entry),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.breakfast.len() + self.lunch.len() + self.dinner.len() + self.snack.len()
    }
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub days: Vec<DayColumn>,
}

/// Single-day view with the computed totals. Fat and carbohydrate totals
/// are placeholders fixed at zero.
#[derive(Debug, Serialize)]
pub struct DayView {
    pub weekday: &'static str,
    pub label: &'static str,
    pub is_today: bool,
    pub prev: &'static str,
    pub next: &'static str,
    pub breakfast: Vec<FoodEntry>,
    pub lunch: Vec<FoodEntry>,
    pub dinner: Vec<FoodEntry>,
    pub snack: Vec<FoodEntry>,
    pub calorie_total: i64,
    pub protein_total: i64,
    pub fat_total: i64,
    pub carb_total: i64,
}

/// Distribute a flat set of entries over the seven fixed weekdays. Every
/// entry lands in exactly one bucket; unknown weekday or slot strings
/// default to index 0 rather than being dropped.
pub fn organize_week(entries: Vec<FoodEntry>, today: Weekday) -> WeekView {
    let mut days: Vec<DayColumn> = Weekday::ALL
        .into_iter()
        .map(|d| DayColumn::empty(d, today))
        .collect();

    for entry in entries {
        let day_index = Weekday::index_of(&entry.weekday);
        let slot_index = MealSlot::index_of(&entry.time_in_day);
        days[day_index].push(slot_index, entry);
    }

    WeekView { days }
}

/// Build the view for one weekday, with calorie and protein totals over
/// that day's entries. Entries belonging to other weekdays are ignored.
pub fn organize_day(entries: Vec<FoodEntry>, day: Weekday, today: Weekday) -> DayView {
    let mut column = DayColumn::empty(day, today);
    let mut calorie_total: i64 = 0;
    let mut protein_total: i64 = 0;

    for entry in entries {
        if Weekday::index_of(&entry.weekday) != day as usize {
            continue;
        }
        calorie_total += i64::from(entry.calorie_amount);
        if entry.food_type == "protein" {
            protein_total += i64::from(entry.food_amount);
        }
        let slot_index = MealSlot::index_of(&entry.time_in_day);
        column.push(slot_index, entry);
    }

    DayView {
        weekday: day.as_str(),
        label: day.label(),
        is_today: day == today,
        prev: day.prev().as_str(),
        next: day.next().as_str(),
        breakfast: column.breakfast,
        lunch: column.lunch,
        dinner: column.dinner,
        snack: column.snack,
        calorie_total,
        protein_total,
        fat_total: 0,
        carb_total: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn entry(name: &str, food_type: &str, grams: i32, cal: i32, day: &str, slot: &str) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            name: name.into(),
            food_type: food_type.into(),
            food_amount: grams,
            calorie_amount: cal,
            weekday: day.into(),
            time_in_day: slot.into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn navigation_is_cyclic() {
        assert_eq!(Weekday::Sunday.next(), Weekday::Monday);
        assert_eq!(Weekday::Monday.prev(), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.next(), Weekday::Thursday);
        assert_eq!(Weekday::Wednesday.prev(), Weekday::Tuesday);
        for day in Weekday::ALL {
            assert_eq!(day.next().prev(), day);
        }
    }

    #[test]
    fn unknown_weekday_defaults_to_monday() {
        assert_eq!(Weekday::index_of("someday"), 0);
        assert_eq!(Weekday::index_of(""), 0);
        assert_eq!(Weekday::index_of("friday"), 4);
        assert_eq!(Weekday::index_of("FRIDAY"), 4);
    }

    #[test]
    fn week_grouping_is_lossless() {
        let entries = vec![
            entry("eggs", "protein", 100, 150, "monday", "breakfast"),
            entry("beef", "protein", 150, 250, "monday", "dinner"),
            entry("rice", "carbohydrate", 200, 260, "tuesday", "lunch"),
            entry("apple", "fruit", 80, 50, "sunday", "snack"),
            entry("mystery", "snack", 10, 10, "noday", "noslot"),
        ];
        let total = entries.len();

        let week = organize_week(entries, Weekday::Monday);
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days.iter().map(DayColumn::entry_count).sum::<usize>(), total);

        // Unknown weekday/slot lands in monday breakfast, not nowhere.
        assert!(week.days[0].breakfast.iter().any(|e| e.name == "mystery"));
        assert_eq!(week.days[0].dinner.len(), 1);
        assert_eq!(week.days[1].lunch.len(), 1);
        assert_eq!(week.days[6].snack.len(), 1);
    }

    #[test]
    fn days_come_in_fixed_order_with_today_flag() {
        let week = organize_week(Vec::new(), Weekday::Thursday);
        let order: Vec<&str> = week.days.iter().map(|d| d.weekday).collect();
        assert_eq!(
            order,
            vec!["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"]
        );
        assert!(week.days[3].is_today);
        assert_eq!(week.days.iter().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn grouping_preserves_input_order_within_a_bucket() {
        let entries = vec![
            entry("first", "grain", 10, 10, "monday", "lunch"),
            entry("second", "grain", 10, 10, "monday", "lunch"),
            entry("third", "grain", 10, 10, "monday", "lunch"),
        ];
        let week = organize_week(entries, Weekday::Monday);
        let names: Vec<&str> = week.days[0].lunch.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn day_view_computes_totals() {
        let entries = vec![
            entry("beef", "protein", 150, 250, "monday", "dinner"),
            entry("eggs", "protein", 100, 140, "monday", "breakfast"),
            entry("rice", "carbohydrate", 200, 260, "monday", "dinner"),
            entry("tuna", "protein", 120, 130, "tuesday", "lunch"),
        ];
        let day = organize_day(entries, Weekday::Monday, Weekday::Monday);
        assert_eq!(day.calorie_total, 250 + 140 + 260);
        assert_eq!(day.protein_total, 150 + 100);
        assert_eq!(day.fat_total, 0);
        assert_eq!(day.carb_total, 0);
        assert_eq!(day.breakfast.len(), 1);
        assert_eq!(day.dinner.len(), 2);
        assert_eq!(day.lunch.len(), 0);
    }

    #[test]
    fn day_view_without_protein_totals_zero() {
        let entries = vec![entry("rice", "carbohydrate", 200, 260, "friday", "lunch")];
        let day = organize_day(entries, Weekday::Friday, Weekday::Monday);
        assert_eq!(day.protein_total, 0);
        assert_eq!(day.calorie_total, 260);
        assert!(!day.is_today);
    }

    #[test]
    fn single_beef_dinner_example() {
        let entries = vec![entry("beef", "protein", 150, 250, "monday", "dinner")];
        let day = organize_day(entries, Weekday::Monday, Weekday::Monday);
        assert_eq!(day.dinner.len(), 1);
        assert_eq!(day.dinner[0].name, "beef");
        assert_eq!(day.protein_total, 150);
        assert_eq!(day.calorie_total, 250);
        assert_eq!(day.prev, "sunday");
        assert_eq!(day.next, "tuesday");
    }
}
