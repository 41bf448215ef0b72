use crate::domain::player::PlayerStatus;
use crate::domain::SeatIndex;

/// Все места по кругу, начиная со следующего за `start` и заканчивая самим `start`.
pub fn order_after(seat_count: usize, start: SeatIndex) -> Vec<SeatIndex> {
    (1..=seat_count).map(|i| (start + i) % seat_count).collect()
}

/// Найти следующее место после `start` (исключая его), удовлетворяющее условию.
pub fn next_seat_where<F>(statuses: &[PlayerStatus], start: SeatIndex, pred: F) -> Option<SeatIndex>
where
    F: Fn(PlayerStatus) -> bool,
{
    if statuses.is_empty() {
        return None;
    }
    order_after(statuses.len(), start)
        .into_iter()
        .find(|&seat| pred(statuses[seat]))
}

/// Места, которые ещё могут действовать, по кругу после `start`.
/// Сам `start` попадает в конец списка, если он тоже может действовать.
pub fn actors_after(statuses: &[PlayerStatus], start: SeatIndex) -> Vec<SeatIndex> {
    if statuses.is_empty() {
        return Vec::new();
    }
    order_after(statuses.len(), start)
        .into_iter()
        .filter(|&seat| statuses[seat].can_act())
        .collect()
}

/// Следующая позиция дилера:
/// - если кнопки ещё не было – место 0;
/// - иначе ровно на одно место дальше по кругу.
pub fn next_dealer(current: Option<SeatIndex>, seat_count: usize) -> SeatIndex {
    match current {
        Some(button) if seat_count > 0 => (button + 1) % seat_count,
        _ => 0,
    }
}
