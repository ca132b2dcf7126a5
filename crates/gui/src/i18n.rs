use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ru,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.new" => if ru { "Новая сцена" } else { "New scene" },
        "menu.import_obj" => if ru { "Импорт OBJ..." } else { "Import OBJ..." },
        "menu.import_title" => if ru { "Импорт OBJ" } else { "Import OBJ" },
        "menu.export_obj" => if ru { "Экспорт активного в OBJ..." } else { "Export active as OBJ..." },
        "menu.export_title" => if ru { "Экспорт OBJ" } else { "Export OBJ" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.undo" => if ru { "Отменить  Ctrl+Z" } else { "Undo  Ctrl+Z" },
        "menu.redo" => if ru { "Повторить  Ctrl+Shift+Z" } else { "Redo  Ctrl+Shift+Z" },
        "menu.delete" => if ru { "Удалить  Del" } else { "Delete  Del" },
        "menu.deselect_all" => if ru { "Снять выделение  Esc" } else { "Deselect all  Esc" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.scene_tree" => if ru { "Список объектов" } else { "Object list" },
        "menu.tools" => if ru { "Панель инструментов" } else { "Tools panel" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.mesh" => if ru { "Сетка" } else { "Mesh" },
        "menu.remesh" => if ru { "Ретопология...  Ctrl+R" } else { "Remesh...  Ctrl+R" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Tools panel / dialog ────────────────────────────
        "tools.title" => if ru { "Autoflow" } else { "Autoflow" },
        "opt.min_cost_flow" => if ru { "Минимальный поток стоимости" } else { "Min-Cost Flow" },
        "opt.min_cost_flow_tip" => if ru { "Решатель минимального потока стоимости (-mcf)" } else { "Use the minimum-cost-flow solver (-mcf)" },
        "opt.sharp" => if ru { "Сохранять острые рёбра" } else { "Sharp Preserving" },
        "opt.sharp_tip" => if ru { "Находить и сохранять острые рёбра (-sharp)" } else { "Detect and preserve sharp edges (-sharp)" },
        "opt.flip_removal" => if ru { "Удаление переворотов" } else { "Flip Removal" },
        "opt.flip_removal_tip" => if ru { "SAT-решатель для удаления переворотов (-sat, нужен minisat)" } else { "Remove flips with the SAT solver (-sat, needs minisat)" },
        "opt.require_manifold" => if ru { "Требовать многообразие" } else { "Require Manifold Input" },
        "opt.require_manifold_tip" => if ru { "Не запускать для немногообразных сеток" } else { "Refuse to remesh non-manifold meshes" },
        "opt.resolution" => if ru { "Разрешение" } else { "Resolution" },
        "opt.resolution_tip" => if ru { "Целевое число граней (-f)" } else { "Target face count (-f)" },
        "tools.remesh" => if ru { "Ретопология" } else { "Remesh" },
        "tools.busy" => if ru { "Выполняется..." } else { "Running..." },
        "tools.check_manifold" => if ru { "Проверить многообразие" } else { "Check manifold" },
        "tools.manifold_ok" => if ru { "Сетка многообразна" } else { "Mesh is manifold" },
        "tools.last_command" => if ru { "Последняя команда" } else { "Last command" },

        "dialog.remesh_title" => if ru { "Ретопология" } else { "Remesh" },
        "dialog.ok" => if ru { "OK" } else { "OK" },
        "dialog.cancel" => if ru { "Отмена" } else { "Cancel" },

        // ── Scene tree ──────────────────────────────────────
        "tree.scene" => if ru { "Объекты" } else { "Objects" },
        "tree.no_objects" => if ru { "Объектов нет." } else { "No objects yet." },
        "tree.import_hint" => if ru { "Импортируйте OBJ через меню Файл." } else { "Import an OBJ file from the File menu." },
        "tree.show" => if ru { "Показать" } else { "Show" },
        "tree.rename" => if ru { "Переименовать" } else { "Rename" },
        "tree.hide" => if ru { "Скрыть" } else { "Hide" },
        "tree.delete" => if ru { "Удалить" } else { "Delete" },

        // ── Settings ────────────────────────────────────────
        "settings.title" => if ru { "Параметры" } else { "Preferences" },
        "settings.quadriflow" => if ru { "QuadriFlow" } else { "QuadriFlow" },
        "settings.path" => if ru { "Путь к QuadriFlow:" } else { "QuadriFlow path:" },
        "settings.browse" => if ru { "Обзор..." } else { "Browse..." },
        "settings.browse_title" => if ru { "Выберите исполняемый файл QuadriFlow" } else { "Select the QuadriFlow executable" },
        "settings.timeout" => if ru { "Тайм-аут (0 = без ограничения):" } else { "Timeout (0 = unlimited):" },
        "settings.sat_missing" => if ru { "Удаление переворотов недоступно: нужен Linux с minisat и timeout" } else { "Flip removal unavailable: needs Linux with minisat and timeout" },
        "settings.exchange" => if ru { "Обмен" } else { "Exchange" },
        "settings.triangulate" => if ru { "Триангулировать при экспорте" } else { "Triangulate on export" },
        "settings.import_mode" => if ru { "Результат:" } else { "Result:" },
        "settings.temp_root" => if ru { "Временная папка:" } else { "Scratch folder:" },
        "settings.temp_default" => if ru { "(системная)" } else { "(system default)" },
        "settings.clear" => if ru { "Сбросить" } else { "Clear" },
        "settings.viewport" => if ru { "Окно просмотра" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона:" } else { "Background color:" },
        "settings.wire_color" => if ru { "Цвет каркаса:" } else { "Wire color:" },
        "settings.active_color" => if ru { "Цвет активного:" } else { "Active color:" },
        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта:" } else { "Font size:" },
        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Status bar ──────────────────────────────────────
        "status.objects" => if ru { "Объекты" } else { "Objects" },
        "status.selected" => if ru { "Выбрано" } else { "Selected" },
        "status.ready" => if ru { "Готово" } else { "Ready" },
        "status.running" => if ru { "QuadriFlow работает..." } else { "QuadriFlow running..." },

        _ => "???",
    }
}
