//! Minimal server-rendered pages. The HTML surface is deliberately thin;
//! anything programmatic goes through the JSON mode instead.

use std::fmt::Write as _;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::calendar::{DayColumn, DayView, WeekView};
use crate::foods::repo::FoodEntry;
use crate::grocery::repo::{GroceryItem, WeekSnapshot};

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn fmt_date(t: OffsetDateTime) -> String {
    let fmt = format_description!("[month]/[day]/[year]");
    t.format(&fmt).unwrap_or_else(|_| t.to_string())
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n\
         <nav><a href=\"/\">Week</a> | <a href=\"/grocery-list\">Grocery list</a> | \
         <a href=\"/grocery-history\">History</a></nav>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn entry_line(entry: &FoodEntry) -> String {
    format!(
        "<li>{} ({}g, {} cal) \
         <a href=\"/edit/{}\">edit</a> <a href=\"/delete/{}\">delete</a></li>",
        escape(&entry.name),
        entry.food_amount,
        entry.calorie_amount,
        entry.id,
        entry.id
    )
}

fn slot_list(label: &str, entries: &[FoodEntry]) -> String {
    let mut out = format!("<h4>{label}</h4>\n<ul>");
    for entry in entries {
        out.push_str(&entry_line(entry));
    }
    out.push_str("</ul>\n");
    out
}

fn day_buckets(day: &DayColumn) -> String {
    let mut out = String::new();
    out.push_str(&slot_list("Breakfast", &day.breakfast));
    out.push_str(&slot_list("Lunch", &day.lunch));
    out.push_str(&slot_list("Dinner", &day.dinner));
    if !day.snack.is_empty() {
        out.push_str(&slot_list("Snacks", &day.snack));
    }
    out
}

pub fn week_page(week: &WeekView) -> String {
    let mut body = String::from("<h1>Weekly meal plan</h1>\n<div class=\"week\">\n");
    for day in &week.days {
        let class = if day.is_today {
            "day today"
        } else if day.entry_count() == 0 {
            "day empty"
        } else {
            "day"
        };
        let _ = write!(
            body,
            "<section class=\"{}\">\n<h2><a href=\"/day/{}\">{}</a></h2>\n{}</section>\n",
            class,
            day.weekday,
            day.label,
            day_buckets(day)
        );
    }
    body.push_str("</div>\n");
    page("Weekly meal plan", &body)
}

pub fn day_page(day: &DayView) -> String {
    let mut body = format!(
        "<h1>{}{}</h1>\n<p><a href=\"/day/{}\">&larr; previous</a> | \
         <a href=\"/day/{}\">next &rarr;</a></p>\n",
        day.label,
        if day.is_today { " (today)" } else { "" },
        day.prev,
        day.next
    );
    body.push_str(&slot_list("Breakfast", &day.breakfast));
    body.push_str(&slot_list("Lunch", &day.lunch));
    body.push_str(&slot_list("Dinner", &day.dinner));
    if !day.snack.is_empty() {
        body.push_str(&slot_list("Snacks", &day.snack));
    }
    let _ = write!(
        body,
        "<h3>Totals</h3>\n<ul>\n<li>Calories: {}</li>\n<li>Protein: {}g</li>\n\
         <li>Fat: {}g</li>\n<li>Carbohydrates: {}g</li>\n</ul>\n",
        day.calorie_total, day.protein_total, day.fat_total, day.carb_total
    );
    page(day.label, &body)
}

pub fn edit_page(food: &FoodEntry) -> String {
    let body = format!(
        "<h1>Edit {name}</h1>\n<form method=\"post\" action=\"/edit/{id}\">\n\
         <input name=\"name\" value=\"{name}\">\n\
         <input name=\"food_type\" value=\"{food_type}\">\n\
         <input name=\"food_amount\" value=\"{food_amount}\">\n\
         <input name=\"calorie_amount\" value=\"{calorie_amount}\">\n\
         <input name=\"weekday\" value=\"{weekday}\">\n\
         <input name=\"time_in_day\" value=\"{time_in_day}\">\n\
         <button type=\"submit\">Save</button>\n</form>\n",
        id = food.id,
        name = escape(&food.name),
        food_type = escape(&food.food_type),
        food_amount = food.food_amount,
        calorie_amount = food.calorie_amount,
        weekday = escape(&food.weekday),
        time_in_day = escape(&food.time_in_day),
    );
    page("Edit food", &body)
}

pub fn grocery_page(items: &[GroceryItem]) -> String {
    let mut body = String::from(
        "<h1>Grocery list</h1>\n<form method=\"post\" action=\"/grocery-list\">\n\
         <input name=\"food-name\" placeholder=\"Item\">\n\
         <input name=\"amount\" placeholder=\"Amount\">\n\
         <button type=\"submit\">Add</button>\n</form>\n<ul>\n",
    );
    for item in items {
        let _ = write!(
            body,
            "<li>{} — {} (added {})</li>\n",
            escape(&item.name),
            escape(&item.amount),
            fmt_date(item.date_added)
        );
    }
    body.push_str("</ul>\n<p><a href=\"/save-week\">Save this week</a></p>\n");
    page("Grocery list", &body)
}

pub fn history_page(history: &[WeekSnapshot]) -> String {
    let mut body = String::from("<h1>Grocery history</h1>\n");
    for week in history {
        let _ = write!(body, "<h2>Week of {}</h2>\n<ul>\n", fmt_date(week.archived_at));
        for item in &week.items {
            let _ = write!(
                body,
                "<li>{} — {} (added {})</li>\n",
                escape(&item.name),
                escape(&item.amount),
                fmt_date(item.date_added)
            );
        }
        body.push_str("</ul>\n");
    }
    page("Grocery history", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!("<h1>Something went wrong</h1>\n<p>{}</p>\n", escape(message));
    page("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>\"a\" & 'b'</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn error_page_escapes_the_message() {
        let html = error_page("<b>boom</b>");
        assert!(html.contains("&lt;b&gt;boom&lt;/b&gt;"));
        assert!(!html.contains("<b>boom</b>"));
    }
}
