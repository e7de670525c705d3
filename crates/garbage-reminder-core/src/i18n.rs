//! Localized strings.
//!
//! Strings are looked up by their English text. A key without a translation
//! falls back to the key itself, so English needs no table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            "es" => Ok(Language::Es),
            other => Err(ValidationError::InvalidValue {
                field: "language".into(),
                message: format!("unsupported language code '{other}'"),
            }),
        }
    }
}

/// English weekday names indexed by reminder day - 1 (Sunday first).
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Translate `key` into `lang`.
pub fn localize<'a>(lang: Language, key: &'a str) -> &'a str {
    let translated: Option<&'a str> = match lang {
        Language::En => None,
        Language::Zh => zh(key),
        Language::Es => es(key),
    };
    translated.unwrap_or(key)
}

/// Localized weekday name for a reminder day (1 = Sunday .. 7 = Saturday).
/// Returns `None` when `day` is out of range.
pub fn weekday_name(lang: Language, day: u8) -> Option<&'static str> {
    let index = usize::from(day).checked_sub(1)?;
    WEEKDAYS.get(index).copied().map(|name| localize(lang, name))
}

fn zh(key: &str) -> Option<&'static str> {
    let s = match key {
        "Garbage Bin Reminder" => "垃圾桶提醒",
        "Recyclable Waste & Green Waste" => "可回收垃圾和绿色垃圾",
        "General Waste & Green Waste" => "一般垃圾和绿色垃圾",
        "This Week: Recyclable Waste & Green Waste" => "本周：可回收垃圾和绿色垃圾",
        "This Week: General Waste & Green Waste" => "本周：一般垃圾和绿色垃圾",
        "Reminder Day" => "提醒日",
        "Reminder Time" => "提醒时间",
        "Settings" => "设置",
        "Home" => "首页",
        "Notification Time" => "通知时间",
        "Language" => "语言",
        "Theme" => "主题",
        "Notification Sound" => "通知声音",
        "Sunday" => "星期日",
        "Monday" => "星期一",
        "Tuesday" => "星期二",
        "Wednesday" => "星期三",
        "Thursday" => "星期四",
        "Friday" => "星期五",
        "Saturday" => "星期六",
        "Remember to place the correct bins outside." => "记得把正确的垃圾桶放到外面。",
        "Settings Saved" => "设置已保存",
        "Your notification settings have been saved successfully." => "您的通知设置已成功保存。",
        "Smart Reminder Suggestion" => "智能提醒建议",
        "We noticed you often set reminders around this time. Would you like to set this as your default reminder time?" => {
            "我们注意到您经常在这个时间附近设置提醒。要将其设为默认提醒时间吗？"
        }
        "Notification permission error" => "通知权限错误",
        "Notification scheduling error" => "通知安排错误",
        "Light" => "浅色",
        "Dark" => "深色",
        "Default" => "默认",
        "Chime" => "钟声",
        "Alert" => "警报",
        "Silent" => "静音",
        "Loading..." => "加载中...",
        _ => return None,
    };
    Some(s)
}

fn es(key: &str) -> Option<&'static str> {
    let s = match key {
        "Garbage Bin Reminder" => "Recordatorio de contenedores",
        "Recyclable Waste & Green Waste" => "Residuos reciclables y residuos verdes",
        "General Waste & Green Waste" => "Residuos generales y residuos verdes",
        "This Week: Recyclable Waste & Green Waste" => {
            "Esta semana: residuos reciclables y residuos verdes"
        }
        "This Week: General Waste & Green Waste" => "Esta semana: residuos generales y residuos verdes",
        "Reminder Day" => "Día del recordatorio",
        "Reminder Time" => "Hora del recordatorio",
        "Settings" => "Ajustes",
        "Home" => "Inicio",
        "Notification Time" => "Hora de notificación",
        "Language" => "Idioma",
        "Theme" => "Tema",
        "Notification Sound" => "Sonido de notificación",
        "Sunday" => "Domingo",
        "Monday" => "Lunes",
        "Tuesday" => "Martes",
        "Wednesday" => "Miércoles",
        "Thursday" => "Jueves",
        "Friday" => "Viernes",
        "Saturday" => "Sábado",
        "Remember to place the correct bins outside." => {
            "Recuerda sacar los contenedores correctos."
        }
        "Settings Saved" => "Ajustes guardados",
        "Your notification settings have been saved successfully." => {
            "Tus ajustes de notificación se han guardado correctamente."
        }
        "Smart Reminder Suggestion" => "Sugerencia de recordatorio inteligente",
        "We noticed you often set reminders around this time. Would you like to set this as your default reminder time?" => {
            "Hemos notado que sueles poner recordatorios a esta hora. ¿Quieres usarla como hora predeterminada?"
        }
        "Notification permission error" => "Error de permiso de notificaciones",
        "Notification scheduling error" => "Error al programar la notificación",
        "Light" => "Claro",
        "Dark" => "Oscuro",
        "Default" => "Predeterminado",
        "Chime" => "Campanilla",
        "Alert" => "Alerta",
        "Silent" => "Silencio",
        "Loading..." => "Cargando...",
        _ => return None,
    };
    Some(s)
}
